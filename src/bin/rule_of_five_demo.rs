// Rule of five, Rust edition: copy, move, self-assignment and release of an
// exclusively owned resource.
use colored::Colorize;
use ownership_idioms::diagnostics;
use ownership_idioms::{copy_assign_at, move_assign_at, OwningBox, Resource};

fn describe(name: &str, b: &OwningBox) {
    match b.get() {
        Some(r) => println!("  {}: owns x = {} at {:p}", name, r.x, b.as_ptr()),
        None => println!("  {}: {}", name, "empty".dimmed()),
    }
}

fn main() {
    ownership_idioms::trace_location!();

    println!("{}", "Construct a, copy into b".bold());
    let mut a: OwningBox = OwningBox::new();
    if let Some(r) = a.get_mut() {
        r.x = 7;
    }
    let b = a.clone();
    describe("a", &a);
    describe("b", &b);

    println!("{}", "Move a into c".bold());
    let c = a.take();
    describe("a", &a);
    describe("c", &c);

    println!("{}", "Self-assignment is a no-op".bold());
    let mut slots = vec![c, b, OwningBox::from_value(Resource::new(-1))];
    copy_assign_at(&mut slots, 0, 0);
    move_assign_at(&mut slots, 0, 0);
    describe("slots[0]", &slots[0]);

    println!("{}", "Move slots[2] over slots[1]".bold());
    move_assign_at(&mut slots, 1, 2);
    for (i, slot) in slots.iter().enumerate() {
        describe(&format!("slots[{}]", i), slot);
    }

    println!("{}", "Drop everything".bold());
    drop(a);
    drop(slots);

    if !diagnostics::ENABLED {
        println!(
            "{}",
            "(build with --features to-cout to see acquire/release traces)".dimmed()
        );
    }
    println!("{}", "Rule of five example completed".green());
}
