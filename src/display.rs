use std::fmt;

use crate::ast::*;

impl fmt::Display for CalendarExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(tz) = &self.timezone {
            write!(f, " {tz}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CalendarExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarExpr::Shorthand(shorthand) => write!(f, "{}", shorthand.as_str()),
            CalendarExpr::Calendar {
                weekdays,
                date,
                time,
            } => {
                // Sections are joined by one space; absent ones leave no gap.
                let mut sep = "";
                if !weekdays.is_empty() {
                    write_weekday_list(f, weekdays)?;
                    sep = " ";
                }
                if let Some(date) = date {
                    write!(f, "{sep}{date}")?;
                    sep = " ";
                }
                if let Some(time) = time {
                    write!(f, "{sep}{time}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Shorthand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

impl fmt::Display for WeekdayItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekdayItem::Single(day) => write!(f, "{day}"),
            WeekdayItem::Range(from, to) => write!(f, "{from}..{to}"),
        }
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(year) = &self.year {
            write!(f, "{year}-")?;
        }
        let sep = if self.from_end { '~' } else { '-' };
        write!(f, "{}{sep}{}", self.month, self.day)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hour, self.minute)?;
        if let Some(second) = &self.second {
            write!(f, ":{second}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldList::Any => f.write_str("*"),
            FieldList::Items(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for RangeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)?;
        if let Some(end) = &self.end {
            write!(f, "..{end}")?;
        }
        if let Some(step) = &self.step {
            write!(f, "/{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.whole)?;
        if let Some(fraction) = &self.fraction {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

fn write_weekday_list(f: &mut fmt::Formatter<'_>, items: &[WeekdayItem]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
