//! End-to-end TRE scenarios: Description tables parsed and re-emitted
//! through the public `tre` API.

use nitf_j2k_core::io::MemoryIo;
use nitf_j2k_core::tre::{read, write, CountExpr, Description, DescriptionEntry, FieldKind, LengthExpr};

#[test]
fn scenario_a_simple_tre_round_trip() {
    let desc = Description::new(
        "SIMP",
        vec![
            DescriptionEntry::field("A", LengthExpr::Literal(3), FieldKind::AsciiInteger),
            DescriptionEntry::field("B", LengthExpr::Literal(5), FieldKind::AsciiString),
            DescriptionEntry::End,
        ],
    )
    .unwrap();

    let input = b"012HELLO".to_vec();
    let mut io = MemoryIo::from_vec(input.clone());
    let store = read(&desc, &mut io, input.len()).unwrap();

    assert_eq!(store.get("A").unwrap().bytes, b"012");
    assert_eq!(store.get("B").unwrap().bytes, b"HELLO");

    let mut out = MemoryIo::new();
    write(&desc, &store, &mut out).unwrap();
    assert_eq!(out.into_inner(), input);
}

#[test]
fn scenario_b_looped_tre() {
    let desc = Description::new(
        "LOOP",
        vec![
            DescriptionEntry::field("N", LengthExpr::Literal(2), FieldKind::AsciiInteger),
            DescriptionEntry::loop_begin(CountExpr::Expr("N".into())),
            DescriptionEntry::field("V", LengthExpr::Literal(3), FieldKind::AsciiInteger),
            DescriptionEntry::LoopEnd,
            DescriptionEntry::End,
        ],
    )
    .unwrap();

    let input = b"03001002003".to_vec();
    let mut io = MemoryIo::from_vec(input.clone());
    let store = read(&desc, &mut io, input.len()).unwrap();

    assert_eq!(store.get("N").unwrap().bytes, b"03");
    assert_eq!(store.get("V[0]").unwrap().bytes, b"001");
    assert_eq!(store.get("V[1]").unwrap().bytes, b"002");
    assert_eq!(store.get("V[2]").unwrap().bytes, b"003");

    let mut out = MemoryIo::new();
    write(&desc, &store, &mut out).unwrap();
    assert_eq!(out.into_inner(), input);
}

fn conditional_description() -> Description {
    Description::new(
        "COND",
        vec![
            DescriptionEntry::field("FLAG", LengthExpr::Literal(1), FieldKind::AsciiInteger),
            DescriptionEntry::if_("FLAG 1 ="),
            DescriptionEntry::field("X", LengthExpr::Literal(4), FieldKind::AsciiInteger),
            DescriptionEntry::EndIf,
            DescriptionEntry::End,
        ],
    )
    .unwrap()
}

#[test]
fn scenario_c_conditional_tre_true_branch() {
    let desc = conditional_description();
    let input = b"10042".to_vec();
    let mut io = MemoryIo::from_vec(input.clone());
    let store = read(&desc, &mut io, input.len()).unwrap();
    assert_eq!(store.get("X").unwrap().bytes, b"0042");

    let mut out = MemoryIo::new();
    write(&desc, &store, &mut out).unwrap();
    assert_eq!(out.into_inner(), input);
}

#[test]
fn scenario_c_conditional_tre_false_branch_omits_field() {
    let desc = conditional_description();
    let input = b"0".to_vec();
    let mut io = MemoryIo::from_vec(input.clone());
    let store = read(&desc, &mut io, input.len()).unwrap();
    assert!(!store.contains("X"));

    let mut out = MemoryIo::new();
    write(&desc, &store, &mut out).unwrap();
    assert_eq!(out.into_inner(), input);
}

#[test]
fn scenario_f_nested_loop_tag_composition() {
    let desc = Description::new(
        "NEST",
        vec![
            DescriptionEntry::field("N", LengthExpr::Literal(1), FieldKind::AsciiInteger),
            DescriptionEntry::loop_begin(CountExpr::Expr("N".into())),
            DescriptionEntry::field("M", LengthExpr::Literal(1), FieldKind::AsciiInteger),
            DescriptionEntry::loop_begin(CountExpr::Expr("M".into())),
            DescriptionEntry::field("V", LengthExpr::Literal(1), FieldKind::AsciiString),
            DescriptionEntry::LoopEnd,
            DescriptionEntry::LoopEnd,
            DescriptionEntry::End,
        ],
    )
    .unwrap();

    let input = b"22ab2cd".to_vec();
    let mut io = MemoryIo::from_vec(input.clone());
    let store = read(&desc, &mut io, input.len()).unwrap();

    let keys: Vec<&str> = store.iter().map(|(tag, _)| tag).collect();
    assert_eq!(
        keys,
        vec!["N", "M[0]", "V[0][0]", "V[0][1]", "M[1]", "V[1][0]", "V[1][1]"]
    );
    assert_eq!(store.get("V[0][0]").unwrap().bytes, b"a");
    assert_eq!(store.get("V[0][1]").unwrap().bytes, b"b");
    assert_eq!(store.get("V[1][0]").unwrap().bytes, b"c");
    assert_eq!(store.get("V[1][1]").unwrap().bytes, b"d");

    let mut out = MemoryIo::new();
    write(&desc, &store, &mut out).unwrap();
    assert_eq!(out.into_inner(), input);
}

#[test]
fn zero_iteration_loop_produces_no_fields() {
    let desc = Description::new(
        "ZERO",
        vec![
            DescriptionEntry::field("N", LengthExpr::Literal(1), FieldKind::AsciiInteger),
            DescriptionEntry::loop_begin(CountExpr::Expr("N".into())),
            DescriptionEntry::field("V", LengthExpr::Literal(2), FieldKind::AsciiInteger),
            DescriptionEntry::LoopEnd,
            DescriptionEntry::field("TAIL", LengthExpr::Literal(1), FieldKind::AsciiString),
            DescriptionEntry::End,
        ],
    )
    .unwrap();

    let input = b"0Z".to_vec();
    let mut io = MemoryIo::from_vec(input.clone());
    let store = read(&desc, &mut io, input.len()).unwrap();
    assert!(!store.contains("V[0]"));
    assert_eq!(store.get("TAIL").unwrap().bytes, b"Z");
}
