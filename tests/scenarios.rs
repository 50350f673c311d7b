//! End-to-end validation flows over host models.

use std::rc::Rc;
use vigil::builder::{ModelValidationBuilder, PropertyValidationBuilder};
use vigil::core::ValidationResult;
use vigil::discovery::{Member, ModelGraph};
use vigil::numeric::NumericHelper;
use vigil::reactive::{Computed, Observable};
use vigil::rules::{Length, Minimum};
use vigil::state::{
    get_validation_state, Attachable, ModelValidationState, SummaryEntry, Validatable,
    ValidationSlot,
};

struct Address {
    street: Observable<String>,
    postcode: Observable<String>,
    validation: ValidationSlot,
}

impl Address {
    fn new(street: &str, postcode: &str) -> Rc<Self> {
        let address = Rc::new(Self {
            street: Observable::new(street.to_string()),
            postcode: Observable::new(postcode.to_string()),
            validation: ValidationSlot::default(),
        });
        PropertyValidationBuilder::new()
            .name("Street")
            .required(true)
            .missing_failure_message("{name} is required")
            .attach(&address.street)
            .unwrap();
        PropertyValidationBuilder::new()
            .name("Postcode")
            .rule(Length::new(
                Some(4),
                Some(8),
                "{name} must be {minimum} to {maximum} characters",
            ))
            .attach(&address.postcode)
            .unwrap();
        ModelValidationBuilder::new()
            .name("Address")
            .failure_message_format("Address is incomplete")
            .attach(&address)
            .unwrap()
            .validate_my_properties()
            .unwrap();
        address
    }
}

impl ModelGraph for Address {
    fn members(&self) -> Vec<Member> {
        vec![Member::property(&self.street), Member::property(&self.postcode)]
    }
}

impl Attachable for Address {
    fn validation_slot(&self) -> &ValidationSlot {
        &self.validation
    }
}

struct Order {
    customer: Observable<String>,
    quantity: Observable<i64>,
    total: Computed<f64>,
    delivery: Rc<Address>,
    validation: ValidationSlot,
}

impl ModelGraph for Order {
    fn members(&self) -> Vec<Member> {
        vec![
            Member::property(&self.customer),
            Member::property(&self.quantity),
            Member::property(&self.total),
            Member::model(&self.delivery),
            Member::Callable,
        ]
    }
}

impl Attachable for Order {
    fn validation_slot(&self) -> &ValidationSlot {
        &self.validation
    }
}

fn order() -> Rc<Order> {
    let quantity = Observable::new(0i64);
    let total = Computed::deferred({
        let quantity = quantity.clone();
        move || quantity.read() as f64 * 12.5
    });
    let order = Rc::new(Order {
        customer: Observable::new(String::new()),
        quantity,
        total,
        delivery: Address::new("", "AB1"),
        validation: ValidationSlot::default(),
    });

    PropertyValidationBuilder::new()
        .name("Customer")
        .required(true)
        .missing_failure_message("{name} is required")
        .attach(&order.customer)
        .unwrap();
    PropertyValidationBuilder::new()
        .name("Quantity")
        .rule(Minimum::new(1, "{name} must be at least {minimum}"))
        .attach(&order.quantity)
        .unwrap();
    PropertyValidationBuilder::new()
        .name("Total")
        .numeric_format(NumericHelper::init(".", ",", "$", 2).unwrap(), "C,.c")
        .rule(Minimum::new(25.0, "{name} of {value} is below the minimum order"))
        .attach(&order.total)
        .unwrap();
    order
}

fn names(states: &ModelValidationState) -> Vec<String> {
    states.invalid_states().iter().map(|state| state.name()).collect()
}

#[test]
fn scenario_a_required_value_missing() {
    let name = Observable::new(String::new());
    let state = PropertyValidationBuilder::new()
        .required(true)
        .missing_failure_message("Name is required")
        .attach(&name)
        .unwrap();

    assert!(state.result().failed);
    assert_eq!(state.message(), "Name is required");
}

#[test]
fn scenario_b_minimum_rule() {
    let age = Observable::new(15);
    let state = PropertyValidationBuilder::new()
        .rule(Minimum::new(18, "Must be at least 18"))
        .attach(&age)
        .unwrap();

    assert_eq!(state.result(), ValidationResult::failure("Must be at least 18"));

    age.write(21);
    assert_eq!(state.result(), ValidationResult::SUCCESS);
}

#[test]
fn scenario_c_currency_formatting() {
    let helper = NumericHelper::init(".", ",", "$", 2).unwrap();

    assert_eq!(helper.format(1234.5, ",.c"), "$1,234.50");
    assert_eq!(helper.parse("$1,234.50").unwrap(), 1234.5);
}

#[test]
fn scenario_d_summary_lists_failing_property() {
    let name = Observable::new("Ada".to_string());
    let age = Observable::new(12);
    let model = ModelValidationBuilder::new().standalone();
    model.add_validation_states([
        PropertyValidationBuilder::new()
            .name("Name")
            .required(true)
            .attach(&name)
            .unwrap()
            .into(),
        PropertyValidationBuilder::new()
            .name("Age")
            .rule(Minimum::new(18, "{name} must be at least {minimum}"))
            .attach(&age)
            .unwrap()
            .into(),
    ]);

    model.update_summary(false);

    assert_eq!(
        model.summary(),
        vec![SummaryEntry::new("Age", "Age must be at least 18")]
    );
}

#[test]
fn scenario_e_paused_model_waits_for_refresh() {
    let age = Observable::new(30);
    let paused = Observable::new(false);
    let model = ModelValidationBuilder::new()
        .failure_message_format("Invalid")
        .paused(paused.clone())
        .standalone();
    model.add_validation_states([PropertyValidationBuilder::new()
        .rule(Minimum::new(18, "Too young"))
        .attach(&age)
        .unwrap()
        .into()]);
    let before = model.result();
    assert!(before.passed());

    paused.write(true);
    age.write(3);
    assert_eq!(model.result(), before);

    model.refresh();
    assert_eq!(model.result(), ValidationResult::failure("Invalid"));
}

#[test]
fn discovery_builds_the_order_form() {
    let order = order();
    let validation = ModelValidationBuilder::new()
        .name("Order")
        .failure_message_format("Please correct the order")
        .attach(&order)
        .unwrap();

    assert_eq!(validation.validate_my_properties_and_sub_models(), Ok(4));
    assert_eq!(names(&validation), ["Customer", "Quantity", "Total", "Address"]);
    assert_eq!(validation.message(), "Please correct the order");

    let found = get_validation_state(&order).unwrap();
    assert_eq!(found.id(), validation.id());
}

#[test]
fn computed_property_message_uses_formatted_value() {
    let order = order();
    let total = get_validation_state(&order.total).unwrap();

    order.quantity.write(1);
    assert_eq!(total.message(), "Total of $12.50 is below the minimum order");

    order.quantity.write(2);
    assert!(total.passed());
    assert_eq!(total.message(), "");
}

#[test]
fn fixing_every_field_passes_the_whole_order() {
    let order = order();
    let validation = ModelValidationBuilder::new().attach(&order).unwrap();
    validation.validate_all().unwrap();
    assert_eq!(
        names(&validation),
        ["Customer", "Quantity", "Total", "Address", "Street", "Postcode"]
    );

    order.customer.write("Grace".to_string());
    order.quantity.write(3);
    order.delivery.street.write("1 Infinite Loop".to_string());
    order.delivery.postcode.write("AB1 2CD".to_string());

    assert!(validation.passed());
    assert!(validation.failures().is_success());
}

#[test]
fn submit_attempt_reveals_messages() {
    let order = order();
    let validation = ModelValidationBuilder::new().attach(&order).unwrap();
    validation.validate_all_properties().unwrap();
    let customer = get_validation_state(&order.customer).unwrap();

    assert!(customer.failed());
    assert!(!customer.touched());

    validation.set_touched(true);
    assert!(customer.touched());
    assert!(validation.touched());
    let street = get_validation_state(&order.delivery.street).unwrap();
    assert!(street.touched());
}

#[test]
fn nested_summaries_are_refreshed_on_request() {
    let order = order();
    let validation = ModelValidationBuilder::new().attach(&order).unwrap();
    validation.validate_my_properties_and_sub_models().unwrap();
    let delivery = get_validation_state(&order.delivery).unwrap();
    let delivery = delivery.as_model().unwrap();

    validation.update_summary(true);

    assert_eq!(validation.summary().len(), 4);
    assert_eq!(
        delivery.summary(),
        vec![
            SummaryEntry::new("Street", "Street is required"),
            SummaryEntry::new("Postcode", "Postcode must be 4 to 8 characters"),
        ]
    );
    assert!(delivery.summary_updated_at().is_some());

    validation.clear_summary(true);
    assert!(delivery.summary().is_empty());
}

#[test]
fn sub_model_can_be_excluded_after_discovery() {
    let order = order();
    let validation = ModelValidationBuilder::new().attach(&order).unwrap();
    validation.validate_all_properties().unwrap();
    assert_eq!(validation.validation_states().len(), 5);

    validation.stop_validating_sub_model(&order.delivery);

    assert_eq!(names(&validation), ["Customer", "Quantity", "Total"]);
}

#[test]
fn bound_entry_failure_overrides_the_value() {
    let quantity = Observable::new(5i64);
    let state = PropertyValidationBuilder::new()
        .name("Quantity")
        .invalid_entry_failure_message("{name} must be a whole number")
        .attach(&quantity)
        .unwrap();
    assert!(state.passed());

    state.bound_entry().set_focused(true);
    state.record_invalid_entry();
    assert_eq!(state.message(), "Quantity must be a whole number");

    state.clear_entry();
    assert!(state.passed());
}

#[test]
fn conditional_requirement_follows_other_fields() {
    let wants_invoice = Observable::new(false);
    let vat_number = Observable::new(String::new());
    let state = PropertyValidationBuilder::new()
        .name("VAT number")
        .required_when({
            let wants_invoice = wants_invoice.clone();
            move || wants_invoice.read()
        })
        .missing_failure_message("{name} is required for invoices")
        .attach(&vat_number)
        .unwrap();

    assert!(state.passed());

    wants_invoice.write(true);
    assert_eq!(state.message(), "VAT number is required for invoices");

    vat_number.write("GB123".to_string());
    assert!(state.passed());
}

#[test]
fn inapplicable_sub_model_is_ignored_by_parent() {
    let shipping = Observable::new(true);
    let street = Observable::new(String::new());
    let address = ModelValidationBuilder::new()
        .name("Address")
        .applicable_when({
            let shipping = shipping.clone();
            move || shipping.read()
        })
        .failure_message_format("Address is incomplete")
        .standalone();
    address.add_validation_states([PropertyValidationBuilder::new()
        .required(true)
        .attach(&street)
        .unwrap()
        .into()]);
    let order = ModelValidationBuilder::new().standalone();
    order.add_validation_states([address.clone().into()]);

    assert!(order.failed());

    shipping.write(false);
    assert!(order.passed());
    assert!(address.failed());
}
