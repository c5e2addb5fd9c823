use std::path::{Path, PathBuf};
use std::process::Command;

fn git_executable() -> PathBuf {
    [
        "/usr/bin/git",
        "/opt/homebrew/bin/git",
        "/usr/local/bin/git",
        "/bin/git",
    ]
    .into_iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
    .unwrap_or_else(|| PathBuf::from("git"))
}

pub fn run_git(repo: &Path, args: &[&str]) {
    let status = Command::new(git_executable())
        .current_dir(repo)
        .args(args)
        .status();
    assert!(status.is_ok_and(|s| s.success()), "git {args:?}");
}

pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) {
    let parent = path.parent().unwrap();
    std::fs::create_dir_all(parent).unwrap();
    std::fs::write(path, contents).unwrap();
}

pub const CALC_SOURCE: &str = "\
package a;

public class Calc {
    public int add(int a, int b) {
        return a + b;
    }

    public int twice(int a) {
        return add(a, a);
    }
}
";

pub const CALC_TEST_SOURCE: &str = "\
package a;

import org.junit.Test;

public class CalcTest {
    @Test
    public void adds() {
        assertEquals(3, new Calc().add(1, 2));
    }

    @Test
    public void doubles() {
        assertEquals(4, new Calc().twice(2));
    }
}
";

/// A committed Maven-layout repository with a compiled (git-ignored) `a.Calc`
/// whose code spans lines 4..=9. Returns the class bytes.
pub fn init_java_repo(repo: &Path) -> Vec<u8> {
    run_git(repo, &["init", "-q"]);
    run_git(repo, &["config", "user.email", "covmap@example.com"]);
    run_git(repo, &["config", "user.name", "Covmap"]);

    write_file(&repo.join(".gitignore"), "target/\n");
    write_file(&repo.join("src/main/java/a/Calc.java"), CALC_SOURCE);
    write_file(&repo.join("src/test/java/a/CalcTest.java"), CALC_TEST_SOURCE);
    run_git(repo, &["add", "-A"]);
    run_git(repo, &["commit", "-q", "-m", "init"]);

    let bytes = class_bytes("a/Calc", &[4, 5, 8, 9]);
    write_file(&repo.join("target/classes/a/Calc.class"), &bytes);
    bytes
}

/// Minimal class file with one method whose line table lists `lines`.
pub fn class_bytes(internal_name: &str, lines: &[u16]) -> Vec<u8> {
    let mut b: Vec<u8> = vec![];
    b.extend(0xCAFE_BABEu32.to_be_bytes());
    b.extend(0u16.to_be_bytes());
    b.extend(52u16.to_be_bytes());

    b.extend(7u16.to_be_bytes());
    push_utf8(&mut b, internal_name); // #1
    b.push(7); // #2
    b.extend(1u16.to_be_bytes());
    push_utf8(&mut b, "Code"); // #3
    push_utf8(&mut b, "LineNumberTable"); // #4
    push_utf8(&mut b, "run"); // #5
    push_utf8(&mut b, "()V"); // #6

    b.extend(0x0021u16.to_be_bytes());
    b.extend(2u16.to_be_bytes());
    b.extend(0u16.to_be_bytes());
    b.extend(0u16.to_be_bytes());
    b.extend(0u16.to_be_bytes());

    b.extend(1u16.to_be_bytes());
    b.extend(0x0001u16.to_be_bytes());
    b.extend(5u16.to_be_bytes());
    b.extend(6u16.to_be_bytes());
    b.extend(1u16.to_be_bytes());

    let mut table: Vec<u8> = vec![];
    table.extend((lines.len() as u16).to_be_bytes());
    for (pc, line) in lines.iter().enumerate() {
        table.extend((pc as u16).to_be_bytes());
        table.extend(line.to_be_bytes());
    }
    let mut code: Vec<u8> = vec![];
    code.extend(1u16.to_be_bytes());
    code.extend(1u16.to_be_bytes());
    code.extend(1u32.to_be_bytes());
    code.push(0xb1);
    code.extend(0u16.to_be_bytes());
    code.extend(1u16.to_be_bytes());
    code.extend(4u16.to_be_bytes());
    code.extend((table.len() as u32).to_be_bytes());
    code.extend(table);

    b.extend(3u16.to_be_bytes());
    b.extend((code.len() as u32).to_be_bytes());
    b.extend(code);
    b.extend(0u16.to_be_bytes());
    b
}

fn push_utf8(out: &mut Vec<u8>, s: &str) {
    out.push(1);
    out.extend((s.len() as u16).to_be_bytes());
    out.extend(s.as_bytes());
}
