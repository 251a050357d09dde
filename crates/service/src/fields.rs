use model::{
    journey::Journey,
    query::{KeysetValue, KeysetValueKind},
};

use crate::QueryError;

/// Sortable journey columns as a closed set, resolved from the untrusted
/// `orderBy` string once per request. The variant carries everything the
/// listing engine needs: the SQL column, the cursor value type and how to
/// read the value back out of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneySortField {
    Id,
    DepartureAt,
    ArrivalAt,
    DepartureStationId,
    ArrivalStationId,
    Distance,
    Duration,
}

impl JourneySortField {
    pub fn resolve(name: &str) -> Result<Self, QueryError> {
        match name {
            "id" => Ok(Self::Id),
            "departureAt" => Ok(Self::DepartureAt),
            "arrivalAt" => Ok(Self::ArrivalAt),
            "departureStationId" => Ok(Self::DepartureStationId),
            "arrivalStationId" => Ok(Self::ArrivalStationId),
            "distance" => Ok(Self::Distance),
            "duration" => Ok(Self::Duration),
            unknown => Err(QueryError::InvalidField(unknown.to_owned())),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::DepartureAt => "departure_at",
            Self::ArrivalAt => "arrival_at",
            Self::DepartureStationId => "departure_station_id",
            Self::ArrivalStationId => "arrival_station_id",
            Self::Distance => "distance",
            Self::Duration => "duration",
        }
    }

    pub fn value_kind(self) -> KeysetValueKind {
        match self {
            Self::Id => KeysetValueKind::BigInt,
            Self::DepartureAt | Self::ArrivalAt => KeysetValueKind::Timestamp,
            Self::DepartureStationId
            | Self::ArrivalStationId
            | Self::Distance
            | Self::Duration => KeysetValueKind::Int,
        }
    }

    /// The sort value of `journey` for this field, used when the last row
    /// of a full page becomes the next cursor.
    pub fn value_of(self, journey: &Journey) -> KeysetValue {
        match self {
            Self::Id => KeysetValue::BigInt(journey.id),
            Self::DepartureAt => KeysetValue::Timestamp(journey.departure_at),
            Self::ArrivalAt => KeysetValue::Timestamp(journey.arrival_at),
            Self::DepartureStationId => KeysetValue::Int(journey.departure_station_id),
            Self::ArrivalStationId => KeysetValue::Int(journey.arrival_station_id),
            Self::Distance => KeysetValue::Int(journey.distance),
            Self::Duration => KeysetValue::Int(journey.duration),
        }
    }
}

/// Sortable station columns. Stations paginate by offset, so only the SQL
/// column is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationSortField {
    Id,
    NameFinnish,
    AddressFinnish,
    CityFinnish,
    Operator,
    Capacity,
}

impl StationSortField {
    pub fn resolve(name: &str) -> Result<Self, QueryError> {
        match name {
            "id" => Ok(Self::Id),
            "nameFinnish" => Ok(Self::NameFinnish),
            "addressFinnish" => Ok(Self::AddressFinnish),
            "cityFinnish" => Ok(Self::CityFinnish),
            "operator" => Ok(Self::Operator),
            "capacity" => Ok(Self::Capacity),
            unknown => Err(QueryError::InvalidField(unknown.to_owned())),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::NameFinnish => "name_finnish",
            Self::AddressFinnish => "address_finnish",
            Self::CityFinnish => "city_finnish",
            Self::Operator => "operator",
            Self::Capacity => "capacity",
        }
    }
}
