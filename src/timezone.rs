/// Decides whether a timezone name refers to a zone that actually exists.
///
/// Validation only ever asks yes/no questions, so any source of zone names
/// can stand in for the system database: a fixed list, a closure, a remote
/// lookup.
pub trait TimezoneResolver {
    /// True if `name` is a known IANA zone identifier.
    fn is_known(&self, name: &str) -> bool;

    /// False when there is no timezone data to consult at all. A `false`
    /// here turns every named timezone into
    /// [`CalendarError::TimezoneDatabaseUnavailable`](crate::CalendarError::TimezoneDatabaseUnavailable)
    /// rather than an unknown-timezone error.
    fn is_available(&self) -> bool {
        true
    }
}

impl<F> TimezoneResolver for F
where
    F: Fn(&str) -> bool,
{
    fn is_known(&self, name: &str) -> bool {
        self(name)
    }
}

/// The timezone database jiff finds on this system.
///
/// That is `/usr/share/zoneinfo` (or `$TZDIR`) on Unix, and the copy bundled
/// into the binary where jiff was built with a bundled database. Lookups go
/// through jiff's own name matching, which ignores ASCII case.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeZones;

impl TimezoneResolver for SystemTimeZones {
    fn is_known(&self, name: &str) -> bool {
        match jiff::tz::db().get(name) {
            Ok(_) => true,
            Err(_err) => {
                debug!("timezone lookup for '{name}' failed: {_err}");
                false
            }
        }
    }

    fn is_available(&self) -> bool {
        !jiff::tz::db().is_definitively_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_zones_know_common_names() {
        let tz = SystemTimeZones;
        assert!(tz.is_available());
        assert!(tz.is_known("UTC"));
        assert!(tz.is_known("Pacific/Auckland"));
        assert!(tz.is_known("America/New_York"));
    }

    #[test]
    fn test_system_zones_reject_made_up_names() {
        let tz = SystemTimeZones;
        assert!(!tz.is_known("Definitely/NotAZone"));
        assert!(!tz.is_known("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_closure_resolver() {
        let only_utc = |name: &str| name == "UTC";
        assert!(only_utc.is_known("UTC"));
        assert!(!only_utc.is_known("Europe/Berlin"));
        assert!(only_utc.is_available());
    }

    struct Offline;

    impl TimezoneResolver for Offline {
        fn is_known(&self, _name: &str) -> bool {
            false
        }

        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_custom_resolver_can_report_missing_data() {
        assert!(!Offline.is_available());
        assert!(!Offline.is_known("UTC"));
    }
}
