//! Basic oncalendar API walkthrough: validate, inspect, normalize.

use oncalendar::ast::CalendarExpr;
use oncalendar::{CalendarExpression, CalendarValidator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Validate against the system timezone database
    for pattern in ["Mon..Fri *-*-* 09:00", "weekly Pacific/Auckland", "Mon2030-01-01"] {
        match oncalendar::validate(pattern) {
            Ok(expr) => println!("{pattern:<28} valid, canonical form: {expr}"),
            Err(e) => println!("{pattern:<28} invalid: {e}"),
        }
    }

    // Inspect the structured result
    let expr: CalendarExpression = "sat,sunday *-*-1/7 10:00:30.5 UTC".parse()?;
    if let CalendarExpr::Calendar {
        weekdays,
        date,
        time,
    } = &expr.expr
    {
        println!("\nweekday items: {}", weekdays.len());
        if let Some(date) = date {
            println!("date:          {date}");
        }
        if let Some(time) = time {
            println!("time:          {time}");
        }
    }
    println!("timezone:      {:?}", expr.timezone());

    // Errors carry a span into the normalized input
    if let Err(e) = oncalendar::validate("2030-02-01  04:02:22,44,") {
        println!("\n{}", e.display_rich());
    }

    // A custom resolver restricts which timezones are accepted
    let utc_only = CalendarValidator::with_resolver(|tz: &str| tz == "UTC");
    println!(
        "\n'daily Europe/Berlin' with a UTC-only resolver: {}",
        utc_only.is_valid("daily Europe/Berlin")
    );

    Ok(())
}
