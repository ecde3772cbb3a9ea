use seedbed::{SeedData, SeedTemplate, SlotContext, SlotData, SlotRecord, TypeTag, seed_slots};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct User {
    name: String,
}

#[derive(Debug)]
struct Order {
    quantity: u32,
}

#[seed_slots]
struct Checkout {
    user: User,
    order: Arc<Order>,
}

fn main() {
    let template: SeedTemplate = Checkout::template();
    let types: Vec<TypeTag> = template.types().collect();
    assert_eq!(types, vec![TypeTag::of::<User>(), TypeTag::of::<Order>()]);

    let data = SeedData::new()
        .with("user", User { name: "Ada".to_owned() })
        .with("order", Order { quantity: 3 });
    let slots = SlotData::for_template(&template, data).unwrap();
    let checkout = Checkout::from_slot_data(slots).unwrap();

    assert_eq!(checkout.user.name, "Ada");
    assert_eq!(checkout.order.quantity, 3);
}
