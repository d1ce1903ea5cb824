/// Temporal interpretation hint for date/time-valued fields, handed to the
/// query layer alongside the parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalType {
    Date,
    Time,
    Timestamp,
}

impl TemporalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalType::Date => "DATE",
            TemporalType::Time => "TIME",
            TemporalType::Timestamp => "TIMESTAMP",
        }
    }
}
