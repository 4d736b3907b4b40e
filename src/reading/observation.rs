//! A single station-day observation, the narrow form of a station-month row.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationRecord {
    pub station_id: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Millimetres. Only present values are ever turned into observations.
    pub precipitation: f64,
}
