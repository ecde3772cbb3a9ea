#[seedbed::seed_slots]
struct Checkout {}

fn main() {}
