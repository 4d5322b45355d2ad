//! Public API surface: every entry point a caller may rely on.

use oncalendar::ast::{CalendarExpr, Shorthand, Weekday, WeekdayItem};
use oncalendar::{CalendarError, CalendarExpression, CalendarValidator, SystemTimeZones, TimezoneResolver};

#[test]
fn free_is_valid() {
    assert!(oncalendar::is_valid("Mon..Fri 09:00"));
    assert!(!oncalendar::is_valid("Mon..Fri09:00"));
}

#[test]
fn free_validate_returns_expression() {
    let expr: CalendarExpression = oncalendar::validate("weekly Pacific/Auckland").unwrap();
    assert_eq!(expr.expr, CalendarExpr::Shorthand(Shorthand::Weekly));
    assert_eq!(expr.timezone(), Some("Pacific/Auckland"));
}

#[test]
fn free_parse_skips_timezone_lookup() {
    let expr = oncalendar::parse("daily Definitely/NotAZone").unwrap();
    assert_eq!(expr.timezone(), Some("Definitely/NotAZone"));
    assert!(oncalendar::validate("daily Definitely/NotAZone").is_err());
}

#[test]
fn static_methods() {
    assert!(CalendarExpression::parse("Mon").is_ok());
    assert!(CalendarExpression::validate("2003-03-05 05:40 UTC").is_ok());
    assert!(CalendarExpression::is_valid("*-*-1/3"));
    assert!(!CalendarExpression::is_valid(""));
}

#[test]
fn validate_with_closure() {
    let only_utc = |name: &str| name == "UTC";
    assert!(CalendarExpression::validate_with("daily UTC", only_utc).is_ok());
    let err = CalendarExpression::validate_with("daily Europe/Berlin", only_utc).unwrap_err();
    assert!(matches!(err, CalendarError::UnknownTimezone { ref name, .. } if name == "Europe/Berlin"));
}

#[test]
fn validate_with_passes_offset_text_to_resolver() {
    let accept_all = |_: &str| true;
    for (input, tz) in [
        ("2003-03-05 05:40 +01:00", "+01:00"),
        ("daily +0100", "+0100"),
        ("12:00 -05", "-05"),
    ] {
        let expr = CalendarExpression::validate_with(input, accept_all).unwrap();
        assert_eq!(expr.timezone(), Some(tz), "{input}");
    }

    let seen = std::cell::RefCell::new(Vec::new());
    let recording = |name: &str| {
        seen.borrow_mut().push(name.to_string());
        false
    };
    let err = CalendarExpression::validate_with("12:00 -05", recording).unwrap_err();
    assert!(matches!(err, CalendarError::UnknownTimezone { .. }));
    assert_eq!(seen.into_inner(), vec!["-05".to_string()]);
}

#[test]
fn from_str() {
    let expr: CalendarExpression = "sat..sun".parse().unwrap();
    assert_eq!(
        expr.expr,
        CalendarExpr::Calendar {
            weekdays: vec![WeekdayItem::Range(Weekday::Saturday, Weekday::Sunday)],
            date: None,
            time: None,
        }
    );
    assert!("MonFri".parse::<CalendarExpression>().is_err());
}

#[test]
fn display_is_canonical() {
    let expr = CalendarExpression::parse("  monday,FRI,   *-*-*  8:15 ").unwrap();
    assert_eq!(expr.to_string(), "Mon,Fri *-*-* 8:15");
}

#[test]
fn validator_with_system_zones() {
    let validator: CalendarValidator<SystemTimeZones> = CalendarValidator::new();
    assert!(validator.resolver().is_available());
    assert!(validator.is_valid("12:00 America/New_York"));
    assert!(!validator.is_valid("12:00 America/Nowhere"));
}

#[test]
fn validator_batch() {
    let validator = CalendarValidator::new();
    let results = validator.validate_all(vec!["hourly", "12:30:", "Wed, 17:48"]);
    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_ok());
    assert!(results[1].1.is_err());
    assert!(results[2].1.is_ok());
    assert_eq!(results[1].0, "12:30:");
}

#[test]
fn error_display_and_rich() {
    let err = oncalendar::validate("Mon2030-30-03").unwrap_err();
    assert_eq!(err.to_string(), "missing space before '2030'");
    assert_eq!(err.span(), Some(oncalendar::Span::new(3, 7)));
    assert!(err.display_rich().ends_with("     ^^^^"));
    assert!(err.is_syntax_error());
}

#[test]
fn error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    let err = oncalendar::validate("").unwrap_err();
    assert_error(&err);
    assert_eq!(err, CalendarError::EmptyInput);
}

#[test]
fn normalize_is_public() {
    assert_eq!(oncalendar::lexer::normalize("  Mon   12:00 "), "Mon 12:00");
}

#[test]
fn shorthand_expansion() {
    assert_eq!(Shorthand::Weekly.expansion(), "Mon *-*-* 00:00:00");
    assert_eq!(Shorthand::Quarterly.expansion(), "*-01,04,07,10-01 00:00:00");
}

#[cfg(feature = "serde")]
mod serde_support {
    use oncalendar::CalendarExpression;

    #[test]
    fn serialize_calendar() {
        let expr = CalendarExpression::parse("Mon..Fri *-*-1/2 12:00:30.5 UTC").unwrap();
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["kind"], "calendar");
        assert_eq!(json["weekdays"][0]["range"][0], "monday");
        assert_eq!(json["weekdays"][0]["range"][1], "friday");
        assert_eq!(json["date"]["year"], "any");
        assert_eq!(json["date"]["month"], "any");
        assert_eq!(json["date"]["from_end"], false);
        assert_eq!(json["date"]["day"]["items"][0]["start"], "1");
        assert_eq!(json["date"]["day"]["items"][0]["step"], "2");
        assert_eq!(json["time"]["second"]["items"][0]["start"], "30.5");
        assert_eq!(json["timezone"], "UTC");
    }

    #[test]
    fn serialize_date_without_year() {
        let expr = CalendarExpression::parse("*-1/2").unwrap();
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["date"]["year"], serde_json::Value::Null);
        assert_eq!(json["date"]["month"], "any");
        assert_eq!(json["date"]["day"]["items"][0]["start"], "1");
        assert_eq!(json["timezone"], serde_json::Value::Null);
    }

    #[test]
    fn serialize_shorthand_always_has_timezone() {
        let expr = CalendarExpression::parse("daily").unwrap();
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["kind"], "shorthand");
        assert_eq!(json["shorthand"], "daily");
        assert_eq!(json["expansion"], "*-*-* 00:00:00");
        assert!(json.as_object().unwrap().contains_key("timezone"));
        assert_eq!(json["timezone"], serde_json::Value::Null);
    }

    #[test]
    fn deserialize_from_string() {
        let expr: CalendarExpression = serde_json::from_str("\"Wed *-1\"").unwrap();
        assert_eq!(expr.to_string(), "Wed *-1");
        assert!(serde_json::from_str::<CalendarExpression>("\"MonFri\"").is_err());
    }
}
