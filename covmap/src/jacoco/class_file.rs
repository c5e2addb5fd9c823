//! Just enough of the JVM class-file format to recover a class's name and the
//! line span of its code.

use super::cursor::Cursor;

const CLASS_MAGIC: u32 = 0xCAFE_BABE;

const CONSTANT_UTF8: u8 = 1;
const CONSTANT_INTEGER: u8 = 3;
const CONSTANT_FLOAT: u8 = 4;
const CONSTANT_LONG: u8 = 5;
const CONSTANT_DOUBLE: u8 = 6;
const CONSTANT_CLASS: u8 = 7;
const CONSTANT_STRING: u8 = 8;
const CONSTANT_FIELDREF: u8 = 9;
const CONSTANT_METHODREF: u8 = 10;
const CONSTANT_INTERFACE_METHODREF: u8 = 11;
const CONSTANT_NAME_AND_TYPE: u8 = 12;
const CONSTANT_METHOD_HANDLE: u8 = 15;
const CONSTANT_METHOD_TYPE: u8 = 16;
const CONSTANT_DYNAMIC: u8 = 17;
const CONSTANT_INVOKE_DYNAMIC: u8 = 18;
const CONSTANT_MODULE: u8 = 19;
const CONSTANT_PACKAGE: u8 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedClass {
    /// Internal form, e.g. `a/b/C`.
    pub internal_name: String,
    pub first_line: Option<u32>,
    pub last_line: Option<u32>,
}

#[derive(Debug, Clone)]
enum Constant {
    Utf8(String),
    Class(u16),
    Other,
}

pub fn is_class_file(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) == CLASS_MAGIC
}

pub fn parse_class(bytes: &[u8]) -> Result<ParsedClass, String> {
    let mut cur = Cursor::new(bytes);
    if cur.u4()? != CLASS_MAGIC {
        return Err("bad magic".to_string());
    }
    let _minor = cur.u2()?;
    let _major = cur.u2()?;
    let pool = read_constant_pool(&mut cur)?;

    let _access = cur.u2()?;
    let this_class = cur.u2()?;
    let _super_class = cur.u2()?;
    let interfaces = cur.u2()?;
    cur.take(usize::from(interfaces) * 2)?;

    let fields = cur.u2()?;
    for _ in 0..fields {
        skip_member(&mut cur)?;
    }

    let mut lines = LineSpan::default();
    let methods = cur.u2()?;
    for _ in 0..methods {
        read_method(&mut cur, &pool, &mut lines)?;
    }

    Ok(ParsedClass {
        internal_name: class_name(&pool, this_class)?,
        first_line: lines.first,
        last_line: lines.last,
    })
}

fn read_constant_pool(cur: &mut Cursor<'_>) -> Result<Vec<Constant>, String> {
    let count = cur.u2()?;
    // Index 0 is unused; long and double entries occupy two slots.
    let mut pool = vec![Constant::Other; usize::from(count.max(1))];
    let mut index = 1usize;
    while index < usize::from(count) {
        let tag = cur.u1()?;
        let mut width = 1usize;
        pool[index] = match tag {
            CONSTANT_UTF8 => {
                let len = cur.u2()?;
                Constant::Utf8(String::from_utf8_lossy(cur.take(usize::from(len))?).to_string())
            }
            CONSTANT_CLASS => Constant::Class(cur.u2()?),
            CONSTANT_STRING | CONSTANT_METHOD_TYPE | CONSTANT_MODULE | CONSTANT_PACKAGE => {
                cur.take(2)?;
                Constant::Other
            }
            CONSTANT_METHOD_HANDLE => {
                cur.take(3)?;
                Constant::Other
            }
            CONSTANT_INTEGER
            | CONSTANT_FLOAT
            | CONSTANT_FIELDREF
            | CONSTANT_METHODREF
            | CONSTANT_INTERFACE_METHODREF
            | CONSTANT_NAME_AND_TYPE
            | CONSTANT_DYNAMIC
            | CONSTANT_INVOKE_DYNAMIC => {
                cur.take(4)?;
                Constant::Other
            }
            CONSTANT_LONG | CONSTANT_DOUBLE => {
                cur.take(8)?;
                width = 2;
                Constant::Other
            }
            other => return Err(format!("unknown constant tag {other} at index {index}")),
        };
        index += width;
    }
    Ok(pool)
}

fn utf8(pool: &[Constant], index: u16) -> Result<&str, String> {
    match pool.get(usize::from(index)) {
        Some(Constant::Utf8(s)) => Ok(s),
        _ => Err(format!("constant {index} is not a utf8 entry")),
    }
}

fn class_name(pool: &[Constant], index: u16) -> Result<String, String> {
    match pool.get(usize::from(index)) {
        Some(Constant::Class(name_index)) => utf8(pool, *name_index).map(str::to_string),
        _ => Err(format!("constant {index} is not a class entry")),
    }
}

#[derive(Debug, Default)]
struct LineSpan {
    first: Option<u32>,
    last: Option<u32>,
}

impl LineSpan {
    fn include(&mut self, line: u32) {
        self.first = Some(self.first.map_or(line, |f| f.min(line)));
        self.last = Some(self.last.map_or(line, |l| l.max(line)));
    }
}

fn skip_member(cur: &mut Cursor<'_>) -> Result<(), String> {
    cur.take(6)?;
    let attributes = cur.u2()?;
    for _ in 0..attributes {
        cur.take(2)?;
        let len = cur.u4()?;
        cur.take(len as usize)?;
    }
    Ok(())
}

fn read_method(cur: &mut Cursor<'_>, pool: &[Constant], lines: &mut LineSpan) -> Result<(), String> {
    cur.take(6)?;
    let attributes = cur.u2()?;
    for _ in 0..attributes {
        let name = utf8(pool, cur.u2()?)?;
        let len = cur.u4()?;
        let body = cur.take(len as usize)?;
        if name == "Code" {
            read_code(&mut Cursor::new(body), pool, lines)?;
        }
    }
    Ok(())
}

fn read_code(cur: &mut Cursor<'_>, pool: &[Constant], lines: &mut LineSpan) -> Result<(), String> {
    let _max_stack = cur.u2()?;
    let _max_locals = cur.u2()?;
    let code_len = cur.u4()?;
    cur.take(code_len as usize)?;
    let exceptions = cur.u2()?;
    cur.take(usize::from(exceptions) * 8)?;
    let attributes = cur.u2()?;
    for _ in 0..attributes {
        let name = utf8(pool, cur.u2()?)?;
        let len = cur.u4()?;
        let body = cur.take(len as usize)?;
        if name == "LineNumberTable" {
            let mut table = Cursor::new(body);
            let entries = table.u2()?;
            for _ in 0..entries {
                let _start_pc = table.u2()?;
                lines.include(u32::from(table.u2()?));
            }
        }
    }
    Ok(())
}
