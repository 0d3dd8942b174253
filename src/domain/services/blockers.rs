use std::collections::BTreeSet;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Weekday};
use crate::domain::models::{
    availability::Slot,
    blocker::{BlockType, Blocker, TimeScope},
    schedule::Mode,
};

/// Forward window over which full-day repeating blockers are expanded into dates.
pub const REPEATING_WINDOW_MONTHS: u32 = 5;
/// Number of yearly occurrences generated for a holiday, starting with the current year.
pub const HOLIDAY_RECURRENCE_YEARS: i32 = 5;

/// A weekday-scoped blocker evaluated against each generated day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRule {
    pub days: Vec<Weekday>,
    pub scope: TimeScope,
}

impl DayRule {
    pub fn matches(&self, weekday: Weekday) -> bool {
        self.days.contains(&weekday)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpandedBlockers {
    pub disabled_dates: BTreeSet<NaiveDate>,
    pub day_rules: Vec<DayRule>,
}

impl ExpandedBlockers {
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.disabled_dates.contains(&date)
    }
}

/// Splits the enabled blockers that apply to `mode` into whole dates that are
/// unavailable and weekday rules applied per slot.
///
/// Absolute and relative ranges are clipped to `[today, horizon]`; dates
/// outside that span can never be rendered.
pub fn expand_blockers(
    blockers: &[Blocker],
    mode: Mode,
    today: NaiveDate,
    horizon: NaiveDate,
) -> ExpandedBlockers {
    let mut expanded = ExpandedBlockers::default();

    for blocker in blockers.iter().filter(|b| b.is_enable && b.applies_to(mode)) {
        let kind = match blocker.kind() {
            // Notes annotate the calendar; they never remove availability, even with a date range.
            Some(BlockType::CalendarNotes) | None => continue,
            Some(kind) => kind,
        };

        let relative = blocker.relative_window();
        if let Some((after, length)) = relative {
            if let Some(first) = today.checked_add_days(Days::new(after as u64)) {
                let last = first
                    .checked_add_days(Days::new(length as u64))
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(first);
                insert_range(&mut expanded.disabled_dates, first, last, today, horizon);
            }
        }

        if let Some(start) = blocker.start_on {
            let end = blocker.end_on.filter(|e| *e >= start).unwrap_or(start);
            insert_range(&mut expanded.disabled_dates, start, end, today, horizon);
        }

        let days = blocker.days_of_week();
        let scope = blocker.time_scope();

        if kind == BlockType::ScheduleBlockerRepeating && !days.is_empty() && scope == TimeScope::FullDay {
            let window_end = today
                .checked_add_months(Months::new(REPEATING_WINDOW_MONTHS))
                .unwrap_or(today);
            expanded.disabled_dates.extend(
                today
                    .iter_days()
                    .take_while(|d| *d <= window_end)
                    .filter(|d| days.contains(&d.weekday())),
            );
        }

        if kind == BlockType::HolidayBlocker {
            if let Some(anchor) = blocker.holiday_date {
                expanded.disabled_dates.extend(
                    (today.year()..today.year() + HOLIDAY_RECURRENCE_YEARS)
                        .filter_map(|year| {
                            NaiveDate::from_ymd_opt(year, anchor.month(), anchor.day())
                        }),
                );
            }
        }

        let date_scoped = blocker.start_on.is_some() || relative.is_some();
        let weekday_scoped = matches!(kind, BlockType::ScheduleBlocker | BlockType::ScheduleBlockerRepeating);
        if weekday_scoped && !date_scoped && !days.is_empty() {
            expanded.day_rules.push(DayRule { days, scope });
        }
    }

    expanded
}

fn insert_range(
    set: &mut BTreeSet<NaiveDate>,
    first: NaiveDate,
    last: NaiveDate,
    today: NaiveDate,
    horizon: NaiveDate,
) {
    let from = first.max(today);
    let to = last.min(horizon);
    set.extend(from.iter_days().take_while(|d| *d <= to));
}

/// Applies the weekday rules to one day's raw slots. Ranged rules narrow the
/// list cumulatively; a matching full-day rule empties it.
pub fn filter_slots(slots: Vec<Slot>, weekday: Weekday, rules: &[DayRule]) -> Vec<Slot> {
    let mut remaining = slots;

    for rule in rules.iter().filter(|r| r.matches(weekday)) {
        match rule.scope {
            TimeScope::FullDay => return Vec::new(),
            TimeScope::Range(from, to) => remaining.retain(|slot| !starts_within(slot, from, to)),
            TimeScope::Incomplete => {}
        }
    }

    remaining
}

fn starts_within(slot: &Slot, from: NaiveTime, to: NaiveTime) -> bool {
    if slot.is_always_available == Some(true) {
        return false;
    }
    match slot.start {
        Some(start) => {
            let t = start.time();
            t >= from && t < to
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn horizon() -> NaiveDate {
        date(2027, 3, 31)
    }

    fn blocker(kind: BlockType) -> Blocker {
        Blocker::new("garage".into(), kind)
    }

    fn slot_at(h: u32, m: u32) -> Slot {
        let start = FixedOffset::east_opt(0).unwrap()
            .from_local_datetime(&today().and_hms_opt(h, m, 0).unwrap())
            .single()
            .unwrap();
        Slot {
            id: format!("{:02}{:02}", h, m),
            label: String::new(),
            start: Some(start),
            end: Some(start + chrono::Duration::minutes(30)),
            is_text_timeslot: None,
            is_always_available: None,
            text_slot_id: None,
        }
    }

    #[test]
    fn test_relative_window_blocks_consecutive_days() {
        let mut b = blocker(BlockType::ScheduleBlocker);
        b.block_after_days = Some("2".into());
        b.block_for_days = Some("3".into());

        let expanded = expand_blockers(&[b], Mode::Dropoff, today(), horizon());
        let dates: Vec<_> = expanded.disabled_dates.into_iter().collect();
        assert_eq!(dates, vec![date(2026, 10, 21), date(2026, 10, 22), date(2026, 10, 23)]);
        assert!(expanded.day_rules.is_empty());
    }

    #[test]
    fn test_relative_window_of_zero_days_blocks_nothing() {
        let mut b = blocker(BlockType::ScheduleBlocker);
        b.block_after_days = Some("0".into());
        b.block_for_days = Some("0".into());

        let expanded = expand_blockers(&[b], Mode::Dropoff, today(), horizon());
        assert!(expanded.disabled_dates.is_empty());
    }

    #[test]
    fn test_absolute_range_is_inclusive_and_clipped() {
        let mut b = blocker(BlockType::ScheduleBlocker);
        b.start_on = Some(date(2026, 12, 24));
        b.end_on = Some(date(2026, 12, 26));

        let mut single = blocker(BlockType::ScheduleBlocker);
        single.start_on = Some(date(2026, 11, 2));

        let mut past = blocker(BlockType::ScheduleBlocker);
        past.start_on = Some(date(2026, 10, 1));
        past.end_on = Some(date(2026, 10, 20));

        let expanded = expand_blockers(&[b, single, past], Mode::Waiter, today(), horizon());
        let dates: Vec<_> = expanded.disabled_dates.into_iter().collect();
        assert_eq!(dates, vec![
            date(2026, 10, 19), date(2026, 10, 20),
            date(2026, 11, 2),
            date(2026, 12, 24), date(2026, 12, 25), date(2026, 12, 26),
        ]);
    }

    #[test]
    fn test_repeating_full_day_blocker_covers_five_months_of_weekdays() {
        let mut b = blocker(BlockType::ScheduleBlockerRepeating);
        b.days_of_week_json = "[\"monday\"]".into();

        let expanded = expand_blockers(&[b], Mode::Pickup, today(), horizon());

        assert!(expanded.disabled_dates.iter().all(|d| d.weekday() == Weekday::Mon));
        assert_eq!(expanded.disabled_dates.first(), Some(&date(2026, 10, 19)));
        // 2027-03-19 is the end of the five month window; last Monday before it is 03-15.
        assert_eq!(expanded.disabled_dates.last(), Some(&date(2027, 3, 15)));
        assert_eq!(expanded.disabled_dates.len(), 22);
        assert_eq!(expanded.day_rules.len(), 1);
        assert_eq!(expanded.day_rules[0].scope, TimeScope::FullDay);
    }

    #[test]
    fn test_time_ranged_weekday_blocker_stays_residual() {
        let mut b = blocker(BlockType::ScheduleBlocker);
        b.days_of_week_json = "[\"monday\"]".into();
        b.start_time = Some("11:00 AM".into());
        b.end_time = Some("12:00 PM".into());

        let expanded = expand_blockers(&[b], Mode::Dropoff, today(), horizon());
        assert!(expanded.disabled_dates.is_empty());
        assert_eq!(expanded.day_rules.len(), 1);
        assert!(matches!(expanded.day_rules[0].scope, TimeScope::Range(_, _)));
    }

    #[test]
    fn test_holiday_recurs_for_five_years() {
        let mut b = blocker(BlockType::HolidayBlocker);
        b.holiday_name = Some("Christmas".into());
        b.holiday_date = Some(date(2020, 12, 25));

        let expanded = expand_blockers(&[b], Mode::Dropoff, today(), horizon());
        let years: Vec<i32> = expanded.disabled_dates.iter().map(|d| d.year()).collect();
        assert_eq!(years, vec![2026, 2027, 2028, 2029, 2030]);
        assert!(expanded.disabled_dates.iter().all(|d| d.month() == 12 && d.day() == 25));
    }

    #[test]
    fn test_leap_day_holiday_skips_common_years() {
        let mut b = blocker(BlockType::HolidayBlocker);
        b.holiday_date = Some(date(2024, 2, 29));

        let expanded = expand_blockers(&[b], Mode::Dropoff, today(), horizon());
        let dates: Vec<_> = expanded.disabled_dates.into_iter().collect();
        assert_eq!(dates, vec![date(2028, 2, 29)]);
    }

    #[test]
    fn test_disabled_other_mode_and_note_blockers_are_ignored() {
        let mut disabled = blocker(BlockType::ScheduleBlocker);
        disabled.start_on = Some(date(2026, 10, 20));
        disabled.is_enable = false;

        let mut waiter_only = blocker(BlockType::ScheduleBlocker);
        waiter_only.start_on = Some(date(2026, 10, 21));
        waiter_only.apply_to_json = "[\"waiter\"]".into();

        let mut note = blocker(BlockType::CalendarNotes);
        note.start_on = Some(date(2026, 10, 22));

        let expanded = expand_blockers(&[disabled, waiter_only.clone(), note], Mode::Pickup, today(), horizon());
        assert!(expanded.disabled_dates.is_empty());

        let for_waiter = expand_blockers(&[waiter_only], Mode::Waiter, today(), horizon());
        assert!(for_waiter.is_disabled(date(2026, 10, 21)));
    }

    #[test]
    fn test_calendar_note_blockers_never_disable_dates() {
        let mut dated = blocker(BlockType::CalendarNotes);
        dated.start_on = Some(date(2026, 10, 20));
        dated.end_on = Some(date(2026, 10, 25));

        let mut relative = blocker(BlockType::CalendarNotes);
        relative.block_after_days = Some("0".into());
        relative.block_for_days = Some("7".into());

        let mut weekly = blocker(BlockType::CalendarNotes);
        weekly.days_of_week_json = "[\"monday\"]".into();

        let expanded = expand_blockers(&[dated, relative, weekly], Mode::Dropoff, today(), horizon());
        assert_eq!(expanded, ExpandedBlockers::default());
    }

    #[test]
    fn test_filter_removes_slots_inside_range() {
        let rules = vec![DayRule {
            days: vec![Weekday::Mon],
            scope: TimeScope::Range(NaiveTime::from_hms_opt(11, 0, 0).unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        }];
        let slots = vec![slot_at(10, 30), slot_at(11, 0), slot_at(11, 30), slot_at(12, 0)];

        let kept: Vec<String> = filter_slots(slots.clone(), Weekday::Mon, &rules).into_iter().map(|s| s.id).collect();
        assert_eq!(kept, vec!["1030", "1200"]);

        let other_day = filter_slots(slots, Weekday::Tue, &rules);
        assert_eq!(other_day.len(), 4);
    }

    #[test]
    fn test_filter_full_day_wins_over_ranges() {
        let rules = vec![
            DayRule {
                days: vec![Weekday::Mon],
                scope: TimeScope::Range(NaiveTime::from_hms_opt(9, 0, 0).unwrap(), NaiveTime::from_hms_opt(10, 0, 0).unwrap()),
            },
            DayRule { days: vec![Weekday::Mon, Weekday::Wed], scope: TimeScope::FullDay },
        ];
        assert!(filter_slots(vec![slot_at(10, 0), slot_at(14, 0)], Weekday::Mon, &rules).is_empty());
        assert!(filter_slots(vec![slot_at(10, 0)], Weekday::Wed, &rules).is_empty());
    }

    #[test]
    fn test_filter_ranges_are_cumulative() {
        let rules = vec![
            DayRule {
                days: vec![Weekday::Mon],
                scope: TimeScope::Range(NaiveTime::from_hms_opt(10, 0, 0).unwrap(), NaiveTime::from_hms_opt(10, 30, 0).unwrap()),
            },
            DayRule {
                days: vec![Weekday::Mon],
                scope: TimeScope::Range(NaiveTime::from_hms_opt(11, 0, 0).unwrap(), NaiveTime::from_hms_opt(11, 30, 0).unwrap()),
            },
            DayRule { days: vec![Weekday::Mon], scope: TimeScope::Incomplete },
        ];
        let slots = vec![slot_at(10, 0), slot_at(10, 30), slot_at(11, 0), slot_at(11, 30)];
        let kept: Vec<String> = filter_slots(slots, Weekday::Mon, &rules).into_iter().map(|s| s.id).collect();
        assert_eq!(kept, vec!["1030", "1130"]);
    }

    #[test]
    fn test_filter_keeps_always_available_and_note_slots() {
        let rules = vec![DayRule {
            days: vec![Weekday::Mon],
            scope: TimeScope::Range(NaiveTime::from_hms_opt(0, 0, 0).unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap()),
        }];
        let mut pinned = slot_at(9, 0);
        pinned.is_always_available = Some(true);
        let note = Slot::note("note".into(), "Call us".into());

        let kept = filter_slots(vec![pinned, slot_at(9, 30), note], Weekday::Mon, &rules);
        let ids: Vec<&str> = kept.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["0900", "note"]);
    }
}
