#[seedbed::seed_slots]
struct Checkout(String);

fn main() {}
