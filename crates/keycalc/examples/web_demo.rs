//! Web Calculator Demo
//!
//! Drives the mock-DOM page with clicks and key presses and prints the
//! display after each event, then runs the shared scenarios.
//!
//! Run with: cargo run --example web_demo

use keycalc::driver::run_all_scenarios;
use keycalc::web::{DomEvent, WebCalculator};

fn show(page: &mut WebCalculator, event: DomEvent) {
    let label = match &event {
        DomEvent::Click { element_id } => format!("click {element_id}"),
        DomEvent::KeyDown { key } => format!("key   {key}"),
    };
    let outcome = page.dispatch(event);
    let note = if outcome.default_prevented {
        " (default prevented)"
    } else if !outcome.handled {
        " (ignored)"
    } else {
        ""
    };
    println!("  {label:<20} -> {:>8}{note}", page.display());
}

fn main() {
    let mut page = WebCalculator::new();

    println!("Page buttons:");
    for row in page.keypad().buttons().chunks(4) {
        let labels: Vec<String> = row.iter().map(|b| format!("[{}]", b.label())).collect();
        println!("  {}", labels.join(" "));
    }
    println!();

    println!("Clicks: 12 + 3 × 2 =");
    for id in ["btn-1", "btn-2", "btn-plus", "btn-3", "btn-times", "btn-2", "btn-equals"] {
        show(&mut page, DomEvent::click(id));
    }
    println!();

    println!("Keys: 8 / 0 Enter, then Delete");
    for key in ["8", "/", "0", "Enter", "Delete", "F5"] {
        show(&mut page, DomEvent::key_down(key));
    }
    println!();

    println!("Events dispatched: {}", page.dom().event_history().len());
    println!("Display renders:   {}", page.dom().render_count());

    run_all_scenarios(&mut WebCalculator::new());
    println!("All scenarios passed on the mock DOM");
}
