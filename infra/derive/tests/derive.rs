#[test]
fn seedbed_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/seedbed_error_pass.rs");
    t.pass("tests/ui/seedbed_error_boxed_source.rs");
    t.compile_fail("tests/ui/seedbed_error_tuple_variant.rs");
    t.compile_fail("tests/ui/seedbed_error_no_context.rs");
    t.compile_fail("tests/ui/seedbed_error_bad_context_type.rs");
}

#[test]
fn seed_slots_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/seed_slots_pass.rs");
    t.compile_fail("tests/ui/seed_slots_tuple_struct.rs");
    t.compile_fail("tests/ui/seed_slots_empty.rs");
}
