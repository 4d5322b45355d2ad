#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// A parsed calendar expression: the schedule itself plus an optional timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarExpression {
    pub expr: CalendarExpr,
    /// Trailing timezone text, exactly as written. `None` means local time.
    pub timezone: Option<String>,
}

impl CalendarExpression {
    pub fn new(expr: CalendarExpr) -> Self {
        Self {
            expr,
            timezone: None,
        }
    }
}

/// The schedule part of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarExpr {
    /// `daily`, `weekly`, ...
    Shorthand(Shorthand),
    /// `Mon..Fri *-*-01 12:00:00`. At least one section is present.
    Calendar {
        weekdays: Vec<WeekdayItem>,
        date: Option<DateSpec>,
        time: Option<TimeSpec>,
    },
}

/// Reserved keywords that stand for a complete expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Shorthand {
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Semiannually,
    Yearly,
    Annually,
}

impl Shorthand {
    pub const ALL: [Shorthand; 9] = [
        Self::Minutely,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Semiannually,
        Self::Yearly,
        Self::Annually,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minutely => "minutely",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Semiannually => "semiannually",
            Self::Yearly => "yearly",
            Self::Annually => "annually",
        }
    }

    /// The normalized form systemd substitutes for this keyword.
    pub fn expansion(self) -> &'static str {
        match self {
            Self::Minutely => "*-*-* *:*:00",
            Self::Hourly => "*-*-* *:00:00",
            Self::Daily => "*-*-* 00:00:00",
            Self::Weekly => "Mon *-*-* 00:00:00",
            Self::Monthly => "*-*-01 00:00:00",
            Self::Quarterly => "*-01,04,07,10-01 00:00:00",
            Self::Semiannually => "*-01,07-01 00:00:00",
            Self::Yearly | Self::Annually => "*-01-01 00:00:00",
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|shorthand| shorthand.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Capitalized three-letter form used by the canonical rendering.
    pub fn short(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }

    /// Full name or three-letter abbreviation, any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monday" | "mon" => Some(Self::Monday),
            "tuesday" | "tue" => Some(Self::Tuesday),
            "wednesday" | "wed" => Some(Self::Wednesday),
            "thursday" | "thu" => Some(Self::Thursday),
            "friday" | "fri" => Some(Self::Friday),
            "saturday" | "sat" => Some(Self::Saturday),
            "sunday" | "sun" => Some(Self::Sunday),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A weekday or a two-endpoint weekday range (`Mon..Fri`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeekdayItem {
    Single(Weekday),
    Range(Weekday, Weekday),
}

/// `[year-]month(-|~)day`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DateSpec {
    pub year: Option<FieldList>,
    pub month: FieldList,
    /// The day was introduced by `~`: counted back from the end of the month.
    pub from_end: bool,
    pub day: FieldList,
}

/// `hour:minute[:second]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSpec {
    pub hour: FieldList,
    pub minute: FieldList,
    pub second: Option<FieldList>,
}

/// The contents of one field slot: `*` or a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldList {
    Any,
    Items(Vec<RangeStep>),
}

/// `value[..value][/step]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RangeStep {
    pub start: Value,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub end: Option<Value>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub step: Option<Value>,
}

impl RangeStep {
    pub fn single(start: Value) -> Self {
        Self {
            start,
            end: None,
            step: None,
        }
    }
}

/// A number kept as written. Fields have no magnitude or width limit, so the
/// digits are never converted to a machine integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub whole: String,
    /// Digits after the `.`; only the seconds field admits one.
    pub fraction: Option<String>,
}

impl Value {
    pub fn integer(whole: impl Into<String>) -> Self {
        Self {
            whole: whole.into(),
            fraction: None,
        }
    }

    pub fn decimal(whole: impl Into<String>, fraction: impl Into<String>) -> Self {
        Self {
            whole: whole.into(),
            fraction: Some(fraction.into()),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
