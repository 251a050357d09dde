//! CSV record shapes of the HSL city bike exports and their conversion to
//! insertable models. Timestamps in the exports are local Helsinki time.

use chrono::{NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use model::{journey::JourneyNew, station::StationNew};
use serde::Deserialize;

pub const DATA_TIMEZONE: Tz = chrono_tz::Europe::Helsinki;

// leading/trailing junk seen in the text columns of the exports
const TRIMMED: &[char] = &[' ', ',', '"'];

fn trim_junk(value: String) -> String {
    value.trim_matches(TRIMMED).to_owned()
}

#[derive(Debug, Deserialize)]
pub struct StationRecord {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Nimi")]
    pub name_finnish: String,
    #[serde(rename = "Namn")]
    pub name_swedish: String,
    #[serde(rename = "Name")]
    pub name_english: String,
    #[serde(rename = "Osoite")]
    pub address_finnish: String,
    #[serde(rename = "Adress")]
    pub address_swedish: String,
    #[serde(rename = "Kaupunki")]
    pub city_finnish: String,
    #[serde(rename = "Stad")]
    pub city_swedish: String,
    #[serde(rename = "Operaattor")]
    pub operator: String,
    #[serde(rename = "Kapasiteet")]
    pub capacity: i32,
    #[serde(rename = "x")]
    pub longitude: f64,
    #[serde(rename = "y")]
    pub latitude: f64,
}

impl StationRecord {
    pub fn into_station(self) -> StationNew {
        StationNew {
            id: self.id,
            name_finnish: trim_junk(self.name_finnish),
            name_swedish: trim_junk(self.name_swedish),
            name_english: trim_junk(self.name_english),
            address_finnish: trim_junk(self.address_finnish),
            address_swedish: trim_junk(self.address_swedish),
            city_finnish: trim_junk(self.city_finnish),
            city_swedish: trim_junk(self.city_swedish),
            operator: trim_junk(self.operator),
            capacity: self.capacity,
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JourneyRecord {
    #[serde(rename = "Departure")]
    pub departure: String,
    #[serde(rename = "Return")]
    pub arrival: String,
    #[serde(rename = "Departure station id")]
    pub departure_station_id: i32,
    #[serde(rename = "Return station id")]
    pub arrival_station_id: i32,
    /// Some exports carry these as decimals, hence f64.
    #[serde(rename = "Covered distance (m)")]
    pub distance: f64,
    #[serde(rename = "Duration (sec.)")]
    pub duration: f64,
}

impl JourneyRecord {
    /// None for timestamps that do not parse or do not exist in the data
    /// timezone; such rows are skipped, not fatal.
    pub fn into_journey(self) -> Option<JourneyNew> {
        Some(JourneyNew {
            departure_at: parse_local_timestamp(&self.departure)?,
            arrival_at: parse_local_timestamp(&self.arrival)?,
            departure_station_id: self.departure_station_id,
            arrival_station_id: self.arrival_station_id,
            distance: self.distance as i32,
            duration: self.duration as i32,
        })
    }
}

fn parse_local_timestamp(raw: &str) -> Option<chrono::DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()?;
    DATA_TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn journey_timestamps_are_interpreted_as_helsinki_time() {
        let record = JourneyRecord {
            departure: "2021-06-01T00:00:11".to_owned(),
            arrival: "2021-06-01T00:04:34".to_owned(),
            departure_station_id: 1,
            arrival_station_id: 2,
            distance: 2043.0,
            duration: 259.7,
        };

        let journey = record.into_journey().unwrap();
        // June is summer time, UTC+3
        assert_eq!(
            journey.departure_at,
            Utc.with_ymd_and_hms(2021, 5, 31, 21, 0, 11).unwrap()
        );
        assert_eq!(journey.distance, 2043);
        assert_eq!(journey.duration, 259);
    }

    #[test]
    fn malformed_timestamp_is_skipped() {
        let record = JourneyRecord {
            departure: "not a time".to_owned(),
            arrival: "2021-06-01T00:04:34".to_owned(),
            departure_station_id: 1,
            arrival_station_id: 2,
            distance: 100.0,
            duration: 60.0,
        };
        assert!(record.into_journey().is_none());
    }

    #[test]
    fn station_text_fields_are_trimmed_of_junk() {
        let record = StationRecord {
            id: 501,
            name_finnish: " Hanasaari,".to_owned(),
            name_swedish: "\"Hanaholmen\"".to_owned(),
            name_english: "Hanasaari".to_owned(),
            address_finnish: "Hanasaarenranta 1".to_owned(),
            address_swedish: "Hanaholmsstranden 1".to_owned(),
            city_finnish: "Espoo ".to_owned(),
            city_swedish: "Esbo".to_owned(),
            operator: "CityBike Finland".to_owned(),
            capacity: 10,
            longitude: 24.840319,
            latitude: 60.16582,
        };

        let station = record.into_station();
        assert_eq!(station.name_finnish, "Hanasaari");
        assert_eq!(station.name_swedish, "Hanaholmen");
        assert_eq!(station.city_finnish, "Espoo");
    }
}
