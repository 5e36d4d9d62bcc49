//! Arity dispatch through the façade

mod common;

use common::{assert_eq, sample_args, Call, RecordingBridge};
use jmate_io::{dispatch, printf, select, PrintError, PrintStream, Value, MAX_ARITY};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
fn test_each_arity_reaches_its_entry_point(#[case] n: usize) {
    let stream = PrintStream::new(RecordingBridge::new());
    let args = sample_args(n);

    stream.printf("fmt", &args).unwrap();

    assert_eq!(stream.bridge().calls(), vec![Call::new(n, "fmt", &args)]);
}

#[rstest]
#[case(6)]
#[case(7)]
#[case(64)]
fn test_overflow_is_rejected_without_native_call(#[case] n: usize) {
    let stream = PrintStream::new(RecordingBridge::new());

    let err = stream.printf("fmt", &sample_args(n)).unwrap_err();

    match err {
        PrintError::UnsupportedArity { n: got, max } => {
            assert_eq!(got, n);
            assert_eq!(max, MAX_ARITY);
        }
        other => panic!("expected UnsupportedArity, got {:?}", other),
    }
    assert!(stream.bridge().calls().is_empty());
}

#[test]
fn test_println_forwards_text_then_newline() {
    let stream = PrintStream::new(RecordingBridge::new());

    stream.println("100%").unwrap();

    assert_eq!(
        stream.bridge().calls(),
        vec![Call::new(0, "100%", &[]), Call::new(0, "\n", &[])]
    );
}

#[test]
fn test_format_is_forwarded_verbatim() {
    let stream = PrintStream::new(RecordingBridge::new());
    let format = "%%d %q %-08.3lx \\n";

    stream.printf(format, &[]).unwrap();

    assert_eq!(stream.bridge().calls()[0].format, format);
}

#[test]
fn test_shared_string_keeps_identity() {
    let stream = PrintStream::new(RecordingBridge::new());
    let shared = Value::string("shared");

    stream
        .printf("%s %s", &[shared.clone(), shared.clone()])
        .unwrap();

    let calls = stream.bridge().calls();
    assert!(calls[0].args[0].same_identity(&shared));
    assert!(calls[0].args[1].same_identity(&shared));
}

#[test]
fn test_scenario_hex_one_argument() {
    let stream = PrintStream::new(RecordingBridge::new());

    printf!(stream, "result: 0x%08x\n", 0x92).unwrap();
    printf!(stream, "result: 0x%08x\n", 0x1337).unwrap();

    assert_eq!(
        stream.bridge().calls(),
        vec![
            Call::new(1, "result: 0x%08x\n", &[Value::Int(0x92)]),
            Call::new(1, "result: 0x%08x\n", &[Value::Int(0x1337)]),
        ]
    );
}

#[test]
fn test_scenario_three_arguments_in_order() {
    let stream = PrintStream::new(RecordingBridge::new());

    printf!(stream, "%08x\n", 0x92, -0x1337, 0x1337).unwrap();

    let calls = stream.bridge().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].args,
        vec![Value::Int(0x92), Value::Int(-0x1337), Value::Int(0x1337)]
    );
}

#[test]
fn test_scenario_six_arguments() {
    let stream = PrintStream::new(RecordingBridge::new());

    let result = printf!(stream, "%d", 1, 2, 3, 4, 5, 6);

    assert!(matches!(
        result,
        Err(PrintError::UnsupportedArity { n: 6, max: 5 })
    ));
    assert!(stream.bridge().calls().is_empty());
}

#[test]
fn test_dispatch_reports_selected_entry_point() {
    let bridge = RecordingBridge::new();
    let entry = dispatch(&bridge, "%d %d", &sample_args(2)).unwrap();
    assert_eq!(entry.name(), "printf_2");
    assert_eq!(entry, select(2).unwrap());
}

#[test]
fn test_concurrent_callers() {
    let stream = PrintStream::new(RecordingBridge::new());

    std::thread::scope(|s| {
        for t in 0..4 {
            let stream = &stream;
            s.spawn(move || {
                for i in 0..25 {
                    printf!(stream, "%d %d", t, i).unwrap();
                }
            });
        }
    });

    let calls = stream.bridge().calls();
    assert_eq!(calls.len(), 100);
    assert!(calls.iter().all(|c| c.arity == 2));
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<char>().prop_map(Value::Char),
        any::<i32>().prop_map(Value::Int),
        any::<i64>().prop_map(Value::Long),
        "[a-z%]{0,8}".prop_map(Value::string),
    ]
}

proptest! {
    #[test]
    fn prop_arguments_arrive_unchanged_and_in_order(
        args in prop::collection::vec(arb_value(), 0..=MAX_ARITY),
        format in ".{0,16}",
    ) {
        let stream = PrintStream::new(RecordingBridge::new());
        stream.printf(&format, &args).unwrap();

        let calls = stream.bridge().calls();
        prop_assert_eq!(calls.len(), 1);
        prop_assert_eq!(calls[0].arity, args.len());
        prop_assert_eq!(&calls[0].format, &format);
        prop_assert_eq!(&calls[0].args, &args);
    }

    #[test]
    fn prop_selection_depends_only_on_length(
        a in prop::collection::vec(arb_value(), 0..=MAX_ARITY),
        b in prop::collection::vec(arb_value(), 0..=MAX_ARITY),
    ) {
        let same_len = a.len() == b.len();
        let (ea, eb) = (select(a.len()).unwrap(), select(b.len()).unwrap());
        prop_assert_eq!(ea == eb, same_len);
    }
}
