use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use validator::Validate;

use vitals_tracker_data::database::{open_key_value_store, DatabaseError, StorageConfig};
use vitals_tracker_data::repository::{HistoryRepository, HistoryRepositoryTrait, PersistenceError};

use crate::entities::conversions;
use crate::entities::dashboard::Dashboard;
use crate::entities::errors::ValidationError;
use crate::entities::latest::LatestByType;
use crate::entities::reading::{Measurement, MetricType, Reading};
use crate::entities::request::CreateReadingRequest;
use crate::entities::status::StatusLabel;
use crate::services::classifier::classify;
use crate::services::dashboard::build_dashboard;
use crate::services::insights::generate_insights;
use crate::services::latest::compute_latest_by_type;

/// Tracker service errors
#[derive(Debug, Error)]
pub enum TrackerServiceError {
    /// Input rejected, nothing was stored
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// History could not be read or written
    #[error("Storage error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Selection applied to the history listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    /// Only readings of this metric
    pub metric: Option<MetricType>,
    /// Maximum number of readings returned
    pub limit: Option<usize>,
    /// Number of readings skipped, newest first
    pub offset: Option<usize>,
}

/// Trait for health tracker operations
#[async_trait]
pub trait HealthTrackerServiceTrait: Send + Sync {
    /// Validate a create request and parse its measurement
    fn validate_create_request(&self, request: &CreateReadingRequest) -> Result<Measurement, TrackerServiceError>;

    /// Classify a request without storing it
    fn classify_request(&self, request: &CreateReadingRequest) -> Result<StatusLabel, TrackerServiceError>;

    /// Validate, timestamp and store a new reading
    async fn create_reading(&self, request: CreateReadingRequest) -> Result<Reading, TrackerServiceError>;

    /// Stored readings, newest first, with the total before pagination
    async fn get_history(&self, filter: HistoryFilter) -> Result<(Vec<Reading>, usize), TrackerServiceError>;

    /// Most recent reading of each metric
    async fn get_latest_by_type(&self) -> Result<LatestByType, TrackerServiceError>;

    /// Latest values, statuses and insights
    async fn get_dashboard(&self) -> Result<Dashboard, TrackerServiceError>;

    /// Insight messages for the latest readings
    async fn get_insights(&self) -> Result<Vec<String>, TrackerServiceError>;
}

/// Health tracker service for domain logic
pub struct HealthTrackerService<R: HistoryRepositoryTrait> {
    repository: R,
    /// Last timestamp handed out, keeps creation times strictly increasing
    last_timestamp: Mutex<Option<DateTime<Utc>>>,
}

impl<R: HistoryRepositoryTrait> HealthTrackerService<R> {
    /// Create a new tracker service
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            last_timestamp: Mutex::new(None),
        }
    }

    /// Repository backing this service
    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn next_timestamp(&self) -> Result<DateTime<Utc>, TrackerServiceError> {
        let mut last = self
            .last_timestamp
            .lock()
            .map_err(|e| PersistenceError::Lock(e.to_string()))?;

        let mut now = Utc::now();
        if let Some(previous) = *last {
            if now <= previous {
                now = previous + Duration::microseconds(1);
            }
        }
        *last = Some(now);
        Ok(now)
    }

    /// Readable stored readings, plus the number of records that were skipped
    async fn load_readings(&self) -> Result<(Vec<Reading>, usize), TrackerServiceError> {
        let stored = self.repository.load_all().await.map_err(|e| {
            error!("Failed to load reading history: {}", e);
            e
        })?;

        let total = stored.len();
        let readings: Vec<Reading> = stored
            .into_iter()
            .filter_map(|record| match conversions::convert_to_domain_reading(record) {
                Ok(reading) => Some(reading),
                Err(e) => {
                    warn!("Skipping unreadable stored reading: {}", e);
                    None
                }
            })
            .collect();

        let skipped = total - readings.len();
        if skipped > 0 {
            warn!("{} of {} stored readings could not be read", skipped, total);
        }
        debug!("Loaded {} of {} stored readings", readings.len(), total);
        Ok((readings, skipped))
    }
}

#[async_trait]
impl<R: HistoryRepositoryTrait> HealthTrackerServiceTrait for HealthTrackerService<R> {
    fn validate_create_request(&self, request: &CreateReadingRequest) -> Result<Measurement, TrackerServiceError> {
        if let Err(validation_errors) = request.validate() {
            let error_message = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(ValidationError::Invalid(error_message).into());
        }

        Ok(request.parse_measurement()?)
    }

    fn classify_request(&self, request: &CreateReadingRequest) -> Result<StatusLabel, TrackerServiceError> {
        let measurement = self.validate_create_request(request)?;
        Ok(classify(&measurement))
    }

    async fn create_reading(&self, request: CreateReadingRequest) -> Result<Reading, TrackerServiceError> {
        let measurement = self.validate_create_request(&request).map_err(|e| {
            debug!("Rejected {} reading: {}", request.reading_type.label(), e);
            e
        })?;

        let timestamp = self.next_timestamp()?;
        let reading = Reading::new(measurement, timestamp, request.normalized_notes())?;

        self.repository
            .append(conversions::convert_to_data_reading(&reading))
            .await
            .map_err(|e| {
                error!("Failed to store reading: {}", e);
                e
            })?;

        info!("Recorded {}", reading.measurement().describe());
        Ok(reading)
    }

    async fn get_history(&self, filter: HistoryFilter) -> Result<(Vec<Reading>, usize), TrackerServiceError> {
        let (readings, _) = self.load_readings().await?;
        let mut readings: Vec<Reading> = readings
            .into_iter()
            .filter(|reading| filter.metric.map_or(true, |metric| reading.metric_type() == metric))
            .collect();

        // Later appends come first among equal timestamps
        readings.reverse();
        readings.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        let total = readings.len();
        let page = readings
            .into_iter()
            .skip(filter.offset.unwrap_or(0))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();

        Ok((page, total))
    }

    async fn get_latest_by_type(&self) -> Result<LatestByType, TrackerServiceError> {
        let (readings, _) = self.load_readings().await?;
        Ok(compute_latest_by_type(&readings))
    }

    async fn get_dashboard(&self) -> Result<Dashboard, TrackerServiceError> {
        let (readings, skipped) = self.load_readings().await?;
        let mut dashboard = build_dashboard(&compute_latest_by_type(&readings));
        dashboard.skipped_records = skipped;
        Ok(dashboard)
    }

    async fn get_insights(&self) -> Result<Vec<String>, TrackerServiceError> {
        let latest = self.get_latest_by_type().await?;
        Ok(generate_insights(&latest))
    }
}

/// Create a tracker service over the storage described by `config`
pub fn create_default_tracker_service(
    config: &StorageConfig,
) -> Result<HealthTrackerService<HistoryRepository>, DatabaseError> {
    let store = open_key_value_store(config)?;
    info!(
        "Tracker service using {:?} storage under key '{}'",
        config.backend, config.storage_key
    );
    let repository = HistoryRepository::with_key(store, config.storage_key.clone());
    Ok(HealthTrackerService::new(repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockall::mock;
    use vitals_tracker_data::models::reading::StoredReading;
    use vitals_tracker_data::repository::tests::MockHistoryRepository;

    mock! {
        pub HistoryRepo {}

        #[async_trait]
        impl HistoryRepositoryTrait for HistoryRepo {
            async fn append(&self, reading: StoredReading) -> Result<(), PersistenceError>;
            async fn load_all(&self) -> Result<Vec<StoredReading>, PersistenceError>;
            async fn check_connection(&self) -> Result<String, PersistenceError>;
        }
    }

    fn stored(reading: &Reading) -> StoredReading {
        conversions::convert_to_data_reading(reading)
    }

    fn reading_at(measurement: Measurement, seconds: i64) -> Reading {
        let timestamp = Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap();
        Reading::new(measurement, timestamp, None).unwrap()
    }

    #[test]
    fn test_validate_rejects_long_notes() {
        let service = HealthTrackerService::new(MockHistoryRepository::new());
        let request = CreateReadingRequest::single_value(MetricType::HeartRate, 72).with_notes("x".repeat(1001));

        let err = service.validate_create_request(&request).unwrap_err();
        assert!(err.to_string().contains("Notes cannot exceed 1000 characters"));
    }

    #[test]
    fn test_classify_request_does_not_store() {
        let mut repo = MockHistoryRepo::new();
        repo.expect_append().never();
        let service = HealthTrackerService::new(repo);

        let status = service
            .classify_request(&CreateReadingRequest::blood_pressure("135", "79"))
            .unwrap();
        assert_eq!(status, StatusLabel::HighBloodPressureStage1);
    }

    #[tokio::test]
    async fn test_invalid_request_appends_nothing() {
        let mut repo = MockHistoryRepo::new();
        repo.expect_append().never();
        let service = HealthTrackerService::new(repo);

        let result = service
            .create_reading(CreateReadingRequest::blood_pressure("abc", "80"))
            .await;
        assert!(matches!(
            result,
            Err(TrackerServiceError::Validation(ValidationError::NotAnInteger { field: "systolic", .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_reading_appends_converted_record() {
        let mut repo = MockHistoryRepo::new();
        repo.expect_append()
            .withf(|record: &StoredReading| {
                record.systolic == Some(120) && record.diastolic == Some(80) && record.notes.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = HealthTrackerService::new(repo);

        let reading = service
            .create_reading(CreateReadingRequest::blood_pressure(120, 80).with_notes("  "))
            .await
            .unwrap();
        assert_eq!(reading.measurement(), &Measurement::BloodPressure { systolic: 120, diastolic: 80 });
        assert_eq!(reading.notes(), None);
    }

    #[tokio::test]
    async fn test_storage_failure_is_propagated() {
        let service = HealthTrackerService::new(MockHistoryRepository::new().with_append_failure());

        let result = service
            .create_reading(CreateReadingRequest::single_value(MetricType::BloodSugar, 90))
            .await;
        assert!(matches!(
            result,
            Err(TrackerServiceError::Persistence(PersistenceError::QuotaExceeded { .. }))
        ));
    }

    #[tokio::test]
    async fn test_timestamps_strictly_increase() {
        let service = HealthTrackerService::new(MockHistoryRepository::new());

        let mut previous = None;
        for _ in 0..50 {
            let reading = service
                .create_reading(CreateReadingRequest::single_value(MetricType::HeartRate, 70))
                .await
                .unwrap();
            if let Some(previous) = previous {
                assert!(reading.timestamp() > previous);
            }
            previous = Some(reading.timestamp());
        }
    }

    #[tokio::test]
    async fn test_history_newest_first_with_filter_and_pages() {
        let records = vec![
            stored(&reading_at(Measurement::HeartRate { bpm: 60.0 }, 0)),
            stored(&reading_at(Measurement::BloodSugar { mg_dl: 95.0 }, 1)),
            stored(&reading_at(Measurement::HeartRate { bpm: 80.0 }, 2)),
            stored(&reading_at(Measurement::HeartRate { bpm: 70.0 }, 1)),
        ];
        let service = HealthTrackerService::new(MockHistoryRepository::with_readings(records));

        let (all, total) = service.get_history(HistoryFilter::default()).await.unwrap();
        assert_eq!(total, 4);
        let order: Vec<i64> = all.iter().map(|r| r.timestamp().timestamp() - 1_700_000_000).collect();
        assert_eq!(order, vec![2, 1, 1, 0]);
        // Same second: the later append is listed first
        assert_eq!(all[1].measurement(), &Measurement::HeartRate { bpm: 70.0 });

        let filter = HistoryFilter {
            metric: Some(MetricType::HeartRate),
            limit: Some(1),
            offset: Some(1),
        };
        let (page, total) = service.get_history(filter).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].measurement(), &Measurement::HeartRate { bpm: 70.0 });
    }

    #[tokio::test]
    async fn test_unreadable_records_are_skipped() {
        let mut broken = stored(&reading_at(Measurement::HeartRate { bpm: 60.0 }, 0));
        broken.value = None;
        let records = vec![broken, stored(&reading_at(Measurement::HeartRate { bpm: 75.0 }, 1))];
        let service = HealthTrackerService::new(MockHistoryRepository::with_readings(records));

        let (readings, total) = service.get_history(HistoryFilter::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(readings[0].measurement(), &Measurement::HeartRate { bpm: 75.0 });
    }

    #[tokio::test]
    async fn test_dashboard_reports_unreadable_records() {
        let mut broken = stored(&reading_at(Measurement::HeartRate { bpm: 120.0 }, 10));
        broken.timestamp = "not a timestamp".to_string();
        let records = vec![stored(&reading_at(Measurement::HeartRate { bpm: 64.0 }, 0)), broken];
        let service = HealthTrackerService::new(MockHistoryRepository::with_readings(records));

        let dashboard = service.get_dashboard().await.unwrap();
        assert_eq!(dashboard.metrics[1].display, "64 bpm");
        assert_eq!(dashboard.skipped_records, 1);
    }

    #[tokio::test]
    async fn test_dashboard_and_insights_from_latest() {
        let mut repo = MockHistoryRepo::new();
        let records = vec![
            stored(&reading_at(Measurement::HeartRate { bpm: 110.0 }, 0)),
            stored(&reading_at(Measurement::HeartRate { bpm: 72.0 }, 5)),
            stored(&reading_at(Measurement::Temperature { celsius: 38.0 }, 1)),
        ];
        repo.expect_load_all().times(2).returning(move || Ok(records.clone()));
        repo.expect_append().never();
        let service = HealthTrackerService::new(repo);

        let dashboard = service.get_dashboard().await.unwrap();
        assert_eq!(dashboard.metrics[1].display, "72 bpm");
        assert_eq!(dashboard.metrics[1].status, StatusLabel::Normal);
        assert_eq!(dashboard.metrics[3].status, StatusLabel::High);
        assert_eq!(dashboard.skipped_records, 0);

        let insights = service.get_insights().await.unwrap();
        assert_eq!(
            insights,
            vec!["Your temperature is High (38.0°C), indicating a fever. Rest and consult a doctor if needed."
                .to_string()]
        );
    }

    #[tokio::test]
    async fn test_load_failure_is_propagated() {
        let service = HealthTrackerService::new(MockHistoryRepository::new().with_load_failure());
        assert!(matches!(
            service.get_insights().await,
            Err(TrackerServiceError::Persistence(PersistenceError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_default_service_over_memory_storage() {
        let service = create_default_tracker_service(&StorageConfig::in_memory()).unwrap();
        service
            .create_reading(CreateReadingRequest::single_value(MetricType::Temperature, "36.6"))
            .await
            .unwrap();

        let (readings, total) = service.get_history(HistoryFilter::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(readings[0].measurement().describe(), "Temperature: 36.6 °C");
    }
}
