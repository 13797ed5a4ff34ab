//! # Billing Models
//!
//! Each resource type is a `'static` [`ResourceDescriptor`](resource_framework::ResourceDescriptor)
//! plus a zero-sized marker implementing [`ResourceKind`](resource_framework::ResourceKind).
//! The request plumbing lives in the framework; this module only says what each type
//! looks like and which options its writes require.

mod account;
mod coupon;
mod purchase;

pub use account::{Account, ACCOUNT};
pub use coupon::{Coupon, COUPON};
pub use purchase::{Purchase, PREVIEW, PURCHASE};

use resource_framework::{Fields, Value};

/// Wraps `items` the way the API nests collections inside a body:
/// `<subscriptions><subscription>..</subscription>..</subscriptions>`.
pub fn nested_list(item: &str, items: impl IntoIterator<Item = Fields>) -> Value {
    let items: Vec<Value> = items.into_iter().map(Value::Map).collect();
    let mut wrapper = Fields::new();
    wrapper.insert(item.to_string(), Value::List(items));
    Value::Map(wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::fields;

    #[test]
    fn test_nested_list_shape() {
        let value = nested_list(
            "subscription",
            [fields! { "plan_code" => "gold" }, fields! { "plan_code" => "silver" }],
        );
        let items = value.get("subscription").and_then(Value::as_list).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].get("plan_code"), Some(&Value::from("silver")));
    }
}
