use crate::entities::latest::LatestByType;
use crate::entities::reading::Reading;

/// Most recent reading of each metric.
///
/// Ties on identical timestamps go to the element that comes later in `readings`.
pub fn compute_latest_by_type(readings: &[Reading]) -> LatestByType {
    let mut latest = LatestByType::new();
    for reading in readings {
        let newer = match latest.get(reading.metric_type()) {
            Some(current) => reading.timestamp() >= current.timestamp(),
            None => true,
        };
        if newer {
            latest.insert(reading.clone());
        }
    }
    latest
}
