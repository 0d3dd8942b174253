use crate::domain::models::{garage::Garage, schedule::Mode, service::ServiceId};
use crate::domain::services::availability::ScheduleConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Reads everything the availability engine needs for `garage` and `mode`.
/// The lookups are independent and run concurrently. Capacity settings, misc
/// settings and calendar notes are required; a missing one rejects the request.
pub async fn load_schedule_config(
    state: &AppState,
    garage: &Garage,
    mode: Mode,
    service_ids: &[ServiceId],
) -> Result<ScheduleConfig, AppError> {
    let services = async {
        if service_ids.is_empty() {
            Ok(Vec::new())
        } else {
            state.service_repo.find_by_ids(&garage.id, service_ids).await
        }
    };

    let (capacity, misc, note, blockers, services) = tokio::try_join!(
        state.capacity_repo.find(&garage.id, mode),
        state.settings_repo.find_misc(&garage.id),
        state.settings_repo.find_note(&garage.id),
        state.blocker_repo.list_enabled(&garage.id),
        services,
    )?;

    let capacity = capacity
        .ok_or_else(|| AppError::NotFound(format!("Capacity settings for {} are not configured", mode)))?;
    let misc = misc.ok_or(AppError::NotFound("Misc settings are not configured".into()))?;
    let note = note.ok_or(AppError::NotFound("Calendar notes are not configured".into()))?;

    Ok(ScheduleConfig {
        mode,
        tz: garage.tz(),
        shop_hours: garage.shop_hours(),
        capacity,
        misc,
        note: note.for_mode(mode).to_string(),
        blockers,
        services,
    })
}
