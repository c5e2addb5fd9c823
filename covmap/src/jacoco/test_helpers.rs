/// Minimal class file: one `run()V` method whose line table lists `lines`,
/// plus a long constant so the two-slot pool rule is exercised.
pub(crate) fn class_bytes(internal_name: &str, lines: &[u16]) -> Vec<u8> {
    let mut b: Vec<u8> = vec![];
    b.extend(0xCAFE_BABEu32.to_be_bytes());
    b.extend(0u16.to_be_bytes());
    b.extend(52u16.to_be_bytes());

    b.extend(11u16.to_be_bytes());
    push_utf8(&mut b, internal_name); // #1
    b.push(7); // #2 Class -> #1
    b.extend(1u16.to_be_bytes());
    push_utf8(&mut b, "Code"); // #3
    push_utf8(&mut b, "LineNumberTable"); // #4
    push_utf8(&mut b, "run"); // #5
    push_utf8(&mut b, "()V"); // #6
    b.push(5); // #7 and #8 Long
    b.extend(42u64.to_be_bytes());
    push_utf8(&mut b, "java/lang/Object"); // #9
    b.push(7); // #10 Class -> #9
    b.extend(9u16.to_be_bytes());

    b.extend(0x0021u16.to_be_bytes());
    b.extend(2u16.to_be_bytes());
    b.extend(10u16.to_be_bytes());
    b.extend(0u16.to_be_bytes()); // interfaces
    b.extend(0u16.to_be_bytes()); // fields

    b.extend(1u16.to_be_bytes()); // methods
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
    code.extend(1u16.to_be_bytes()); // max_stack
    code.extend(1u16.to_be_bytes()); // max_locals
    code.extend(1u32.to_be_bytes());
    code.push(0xb1); // return
    code.extend(0u16.to_be_bytes()); // exception table
    code.extend(1u16.to_be_bytes());
    code.extend(4u16.to_be_bytes());
    code.extend((table.len() as u32).to_be_bytes());
    code.extend(table);

    b.extend(3u16.to_be_bytes());
    b.extend((code.len() as u32).to_be_bytes());
    b.extend(code);

    b.extend(0u16.to_be_bytes()); // class attributes
    b
}

fn push_utf8(out: &mut Vec<u8>, s: &str) {
    out.push(1);
    out.extend((s.len() as u16).to_be_bytes());
    out.extend(s.as_bytes());
}
