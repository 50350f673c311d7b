//! Signup Form
//!
//! This example walks a signup form from first render to a successful submit.
//!
//! Key concepts:
//! - Attaching validation to observable fields
//! - Discovering field states from a host model
//! - Hiding messages until the user touches a field or submits
//! - Listing every failure at once with `failures()`
//!
//! Run with: cargo run --example signup_form

use std::rc::Rc;
use stillwater::Validation;
use vigil::builder::{ModelValidationBuilder, PropertyValidationBuilder};
use vigil::discovery::{Member, ModelGraph};
use vigil::reactive::Observable;
use vigil::rules::{Length, Matches, Minimum};
use vigil::state::{Attachable, PropertyValidationState, ValidationSlot};

struct Signup {
    email: Observable<String>,
    password: Observable<String>,
    age: Observable<i64>,
    validation: ValidationSlot,
}

impl ModelGraph for Signup {
    fn members(&self) -> Vec<Member> {
        vec![
            Member::property(&self.email),
            Member::property(&self.password),
            Member::property(&self.age),
        ]
    }
}

impl Attachable for Signup {
    fn validation_slot(&self) -> &ValidationSlot {
        &self.validation
    }
}

struct FieldStates {
    email: PropertyValidationState<String>,
    password: PropertyValidationState<String>,
    age: PropertyValidationState<i64>,
}

fn signup() -> Result<(Rc<Signup>, FieldStates), Box<dyn std::error::Error>> {
    let form = Rc::new(Signup {
        email: Observable::new(String::new()),
        password: Observable::new(String::new()),
        age: Observable::new(0),
        validation: ValidationSlot::default(),
    });

    let fields = FieldStates {
        email: PropertyValidationBuilder::new()
            .name("Email")
            .required(true)
            .missing_failure_message("{name} is required")
            .rule(Matches::pattern(r"^[^@\s]+@[^@\s]+$", "{name} is not an address")?)
            .attach(&form.email)?,
        password: PropertyValidationBuilder::new()
            .name("Password")
            .required(true)
            .missing_failure_message("{name} is required")
            .rule(Length::at_least(8, "{name} needs at least {minimum} characters"))
            .attach(&form.password)?,
        age: PropertyValidationBuilder::new()
            .name("Age")
            .rule(Minimum::new(13, "{name} must be at least {minimum}"))
            .attach(&form.age)?,
    };

    Ok((form, fields))
}

fn print_field<V: 'static>(label: &str, state: &PropertyValidationState<V>) {
    let shown = if state.show_message() {
        state.message()
    } else {
        "-".to_string()
    };
    println!("  {label:<9} failed={:<5} message: {shown}", state.failed());
}

fn print_fields(fields: &FieldStates) {
    print_field("email", &fields.email);
    print_field("password", &fields.password);
    print_field("age", &fields.age);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Signup Form Example ===\n");

    let (form, fields) = signup()?;
    let validation = ModelValidationBuilder::new()
        .name("Signup")
        .failure_message_format("Please fix the highlighted fields")
        .attach(&form)?;
    let found = validation.validate_my_properties()?;
    println!("Discovered {found} validated fields\n");

    println!("Step 1: Fresh form, nothing touched");
    print_fields(&fields);
    println!("  form message: {:?}\n", validation.message());

    println!("Step 2: User types an email and a short password");
    form.email.write("ada@example.com".to_string());
    form.password.write("secret".to_string());
    fields.password.set_touched(true);
    print_fields(&fields);
    println!();

    println!("Step 3: Submit attempt touches every field");
    validation.set_touched(true);
    print_fields(&fields);
    if let Validation::Failure(errors) = validation.failures() {
        println!("  {} problem(s):", errors.len());
        for entry in errors.iter() {
            println!("    {}: {}", entry.name, entry.message);
        }
    }
    println!("  form message: {:?}\n", validation.message());

    println!("Step 4: User fixes the remaining fields");
    form.password.write("correct horse battery".to_string());
    form.age.write(36);
    print_fields(&fields);
    println!("  form passed: {}", validation.passed());

    Ok(())
}
