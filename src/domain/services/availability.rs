use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveTime, Offset, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use tracing::debug;
use crate::domain::models::{
    availability::{Availability, DayAvailability, Slot},
    blocker::Blocker,
    capacity::{CapacitySetting, ManualDay, ScheduleMode, SchedulingHours, TextTimeslot},
    garage::ShopHours,
    schedule::{format_clock, parse_clock, Mode, DEFAULT_INTERVAL_MIN, MAX_INTERVAL_MIN},
    service::Service,
    settings::MiscSettings,
};
use crate::domain::services::blockers::{expand_blockers, filter_slots, ExpandedBlockers};

/// Configuration snapshot for one garage and one mode.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub mode: Mode,
    pub tz: Tz,
    pub shop_hours: Vec<ShopHours>,
    pub capacity: CapacitySetting,
    pub misc: MiscSettings,
    pub note: String,
    pub blockers: Vec<Blocker>,
    pub services: Vec<Service>,
}

/// Decoded capacity setting; the JSON columns are parsed once per request.
struct CapacityPlan {
    schedule_mode: ScheduleMode,
    show_timeslots: bool,
    interval_min: i64,
    hours: Vec<SchedulingHours>,
    text_timeslots: Vec<TextTimeslot>,
    manual: Vec<ManualDay>,
}

impl CapacityPlan {
    fn from_setting(setting: &CapacitySetting) -> Self {
        let interval_min = if setting.timeslot_interval > 0 {
            (setting.timeslot_interval as i64).min(MAX_INTERVAL_MIN)
        } else {
            DEFAULT_INTERVAL_MIN
        };

        Self {
            schedule_mode: setting.schedule_mode(),
            show_timeslots: setting.show_timeslots,
            interval_min,
            hours: setting.scheduling_hours(),
            text_timeslots: setting.text_timeslots(),
            manual: setting.manual_timings(),
        }
    }

    fn hours_for(&self, weekday: Weekday) -> Option<&SchedulingHours> {
        self.hours.iter().find(|h| h.day == weekday)
    }

    fn manual_for(&self, weekday: Weekday) -> Option<&ManualDay> {
        self.manual.iter().find(|m| m.day == weekday)
    }
}

struct DayContext<'a> {
    tz: &'a Tz,
    mode: Mode,
    note: &'a str,
    plan: &'a CapacityPlan,
    final_interval: i64,
}

/// Last date rendered: the end of the month `months` after `today`.
pub fn booking_horizon(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_add_months(Months::new(months))
        .and_then(|target| target.with_day(1))
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today)
}

/// Intersection of shop hours and capacity-schedule hours. `None` when either
/// side is closed, missing, unparseable, or the intersection is empty.
pub fn operating_window(
    shop: &ShopHours,
    schedule: Option<&SchedulingHours>,
) -> Option<(NaiveTime, NaiveTime)> {
    let schedule = schedule?;
    if shop.is_closed || schedule.is_closed {
        return None;
    }

    let start = parse_clock(&shop.start)?.max(parse_clock(&schedule.start)?);
    let end = parse_clock(&shop.end)?.min(parse_clock(&schedule.end)?);

    (start < end).then_some((start, end))
}

/// Duration of the selected services eligible for `mode`: the sum when
/// `sum_durations` is set, otherwise the longest one. Capped at one day.
pub fn resolve_interval(services: &[Service], mode: Mode, sum_durations: bool) -> i64 {
    let minutes = services
        .iter()
        .filter(|s| s.is_eligible_for(mode))
        .map(|s| s.estimated_minutes as i64)
        .filter(|m| *m > 0);

    let resolved = if sum_durations {
        minutes.fold(0i64, i64::saturating_add)
    } else {
        minutes.max().unwrap_or(0)
    };

    if resolved > 0 { resolved.min(MAX_INTERVAL_MIN) } else { DEFAULT_INTERVAL_MIN }
}

pub fn compute_availability(config: &ScheduleConfig, now: DateTime<Utc>) -> Availability {
    let today = now.with_timezone(&config.tz).date_naive();
    let months = config.misc.booking_window_months();
    let horizon = booking_horizon(today, months);

    let expanded = expand_blockers(&config.blockers, config.mode, today, horizon);
    let plan = CapacityPlan::from_setting(&config.capacity);
    let ctx = DayContext {
        tz: &config.tz,
        mode: config.mode,
        note: &config.note,
        plan: &plan,
        final_interval: resolve_interval(
            &config.services,
            config.mode,
            config.misc.is_use_single_service_duration,
        ),
    };

    let days: Vec<DayAvailability> = today
        .iter_days()
        .take_while(|d| *d <= horizon)
        .map(|date| DayAvailability {
            date,
            timeslots: day_slots(&ctx, &config.shop_hours, &expanded, date),
        })
        .collect();

    debug!(
        mode = %config.mode,
        from = %today,
        to = %horizon,
        days = days.len(),
        disabled_dates = expanded.disabled_dates.len(),
        day_rules = expanded.day_rules.len(),
        "computed availability"
    );

    Availability {
        days,
        notes: config.note.clone(),
        booking_window: months,
    }
}

fn day_slots(
    ctx: &DayContext,
    shop_hours: &[ShopHours],
    expanded: &ExpandedBlockers,
    date: NaiveDate,
) -> Vec<Slot> {
    let weekday = date.weekday();

    let shop = match shop_hours.iter().find(|h| h.day == weekday) {
        Some(shop) if !shop.is_closed => shop,
        _ => return Vec::new(),
    };
    if expanded.is_disabled(date) {
        return Vec::new();
    }

    let raw = match ctx.plan.schedule_mode {
        ScheduleMode::Automatic => {
            let Some(window) = operating_window(shop, ctx.plan.hours_for(weekday)) else {
                return Vec::new();
            };
            if ctx.plan.show_timeslots {
                let mut slots = interval_slots(ctx, date, window);
                slots.extend(text_slots(ctx, date));
                slots
            } else {
                vec![Slot::note(format!("{}-{}-note", date, ctx.mode), ctx.note.to_string())]
            }
        }
        ScheduleMode::Manual => manual_slots(ctx, date, weekday),
    };

    filter_slots(raw, weekday, &expanded.day_rules)
}

fn interval_slots(
    ctx: &DayContext,
    date: NaiveDate,
    (window_start, window_end): (NaiveTime, NaiveTime),
) -> Vec<Slot> {
    let step = Duration::minutes(ctx.plan.interval_min);
    let mut slots = Vec::new();
    let mut cursor = window_start;

    while cursor < window_end {
        let bounds = local_datetime(ctx.tz, date, cursor)
            .and_then(|start| Some((start, start.checked_add_signed(step)?)));
        if let Some((start, end)) = bounds {
            slots.push(Slot {
                id: format!("{}-{}", date, cursor.format("%H%M")),
                label: format!("{} - {}", format_clock(start.time()), format_clock(end.time())),
                start: Some(fixed(&start)),
                end: Some(fixed(&end)),
                is_text_timeslot: None,
                is_always_available: None,
                text_slot_id: None,
            });
        }

        let (next, wrapped) = cursor.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        cursor = next;
    }

    slots
}

fn text_slots(ctx: &DayContext, date: NaiveDate) -> Vec<Slot> {
    let step = Duration::minutes(ctx.plan.interval_min);

    ctx.plan
        .text_timeslots
        .iter()
        .filter_map(|text| {
            let start = local_datetime(ctx.tz, date, parse_clock(&text.time)?)?;
            let end = start.checked_add_signed(step)?;
            Some(Slot {
                id: format!("{}-text-{}", date, text.id),
                label: text.label.clone(),
                start: Some(fixed(&start)),
                end: Some(fixed(&end)),
                is_text_timeslot: Some(true),
                is_always_available: Some(text.is_always_available),
                text_slot_id: Some(text.id.clone()),
            })
        })
        .collect()
}

fn manual_slots(ctx: &DayContext, date: NaiveDate, weekday: Weekday) -> Vec<Slot> {
    let Some(day) = ctx.plan.manual_for(weekday) else {
        return Vec::new();
    };
    let step = Duration::minutes(ctx.final_interval);

    day.timings
        .iter()
        .enumerate()
        .filter_map(|(idx, timing)| {
            let start = local_datetime(ctx.tz, date, parse_clock(&timing.start)?)?;
            let end = start.checked_add_signed(step)?;
            let label = if timing.label.trim().is_empty() {
                format!("{} - {}", format_clock(start.time()), format_clock(end.time()))
            } else {
                timing.label.clone()
            };
            Some(Slot {
                id: format!("{}-manual-{}", date, idx),
                label,
                start: Some(fixed(&start)),
                end: Some(fixed(&end)),
                is_text_timeslot: None,
                is_always_available: None,
                text_slot_id: None,
            })
        })
        .collect()
}

/// Earliest instant for a local wall-clock time; `None` inside a DST gap.
fn local_datetime(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(time)).earliest()
}

fn fixed(dt: &DateTime<Tz>) -> DateTime<FixedOffset> {
    dt.with_timezone(&dt.offset().fix())
}
