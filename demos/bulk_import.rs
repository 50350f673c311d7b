//! Bulk Import
//!
//! This example loads a batch of invoice lines while validation is paused,
//! then refreshes once at the end.
//!
//! Key concepts:
//! - Sharing one pause switch between a model and its fields
//! - Frozen results during bulk updates
//! - Sub-models discovered through a collection member
//! - Currency formatting of values in messages
//! - Failure summaries taken on request
//!
//! Run with: cargo run --example bulk_import

use std::rc::Rc;
use vigil::builder::{ModelValidationBuilder, PropertyValidationBuilder};
use vigil::discovery::{Member, ModelGraph};
use vigil::numeric::NumericHelper;
use vigil::reactive::Observable;
use vigil::rules::{Maximum, Minimum};
use vigil::state::{get_validation_state, Attachable, ModelValidationState, ValidationSlot};

struct Line {
    quantity: Observable<i64>,
    unit_price: Observable<f64>,
    validation: ValidationSlot,
}

impl ModelGraph for Line {
    fn members(&self) -> Vec<Member> {
        vec![
            Member::property(&self.quantity),
            Member::property(&self.unit_price),
        ]
    }
}

impl Attachable for Line {
    fn validation_slot(&self) -> &ValidationSlot {
        &self.validation
    }
}

struct Invoice {
    lines: Vec<Rc<Line>>,
    validation: ValidationSlot,
}

impl ModelGraph for Invoice {
    fn members(&self) -> Vec<Member> {
        vec![Member::collection(&self.lines)]
    }
}

impl Attachable for Invoice {
    fn validation_slot(&self) -> &ValidationSlot {
        &self.validation
    }
}

fn line(
    number: usize,
    helper: &NumericHelper,
    paused: &Observable<bool>,
) -> Result<Rc<Line>, Box<dyn std::error::Error>> {
    let line = Rc::new(Line {
        quantity: Observable::new(1),
        unit_price: Observable::new(1.0),
        validation: ValidationSlot::default(),
    });

    PropertyValidationBuilder::new()
        .name(format!("Line {number} quantity"))
        .paused(paused.clone())
        .rule(Minimum::new(1, "{name} must be at least {minimum}"))
        .attach(&line.quantity)?;
    PropertyValidationBuilder::new()
        .name(format!("Line {number} price"))
        .paused(paused.clone())
        .numeric_format(helper.clone(), "C,.c")
        .rule(Maximum::new(10_000.0, "{name} of {value} exceeds the limit"))
        .attach(&line.unit_price)?;
    ModelValidationBuilder::new()
        .name(format!("Line {number}"))
        .failure_message_format(format!("Line {number} has errors"))
        .paused(paused.clone())
        .attach(&line)?
        .validate_my_properties()?;

    Ok(line)
}

fn report(label: &str, validation: &ModelValidationState) {
    println!(
        "{label}: passed={} message={:?}",
        validation.passed(),
        validation.message()
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bulk Import Example ===\n");

    let helper = NumericHelper::init(".", ",", "$", 2)?;
    let paused = Observable::new(false);
    let lines = (1..=3)
        .map(|number| line(number, &helper, &paused))
        .collect::<Result<Vec<_>, _>>()?;
    let invoice = Rc::new(Invoice {
        lines,
        validation: ValidationSlot::default(),
    });

    let validation = ModelValidationBuilder::new()
        .name("Invoice")
        .failure_message_format("The invoice has errors")
        .paused(paused.clone())
        .attach(&invoice)?;
    validation.validate_all()?;
    report("Before import", &validation);

    println!("\nPausing and loading rows...");
    validation.pause();
    let rows = [(2, 19.99), (0, 5.0), (4, 12_500.0)];
    for (line, (quantity, price)) in invoice.lines.iter().zip(rows) {
        line.quantity.write(quantity);
        line.unit_price.write(price);
    }
    report("While paused", &validation);

    println!("\nResuming...");
    validation.resume();
    report("After import", &validation);

    validation.set_touched(true);
    validation.update_summary(true);
    for entry in validation.summary() {
        println!("  {}: {}", entry.name, entry.message);
    }
    for line in &invoice.lines {
        if let Some(state) = get_validation_state(line.as_ref()) {
            if let Some(model) = state.as_model() {
                for entry in model.summary() {
                    println!("    {}: {}", entry.name, entry.message);
                }
            }
        }
    }

    Ok(())
}
