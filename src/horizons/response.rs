use regex::Regex;

use crate::constants::BodyId;
use crate::errors::HeliopathError;

/// One row of a Horizons vector-table response.
///
/// `x,y,z` are the components of the position vector (AU) at the epoch in the
/// `jd` and `date` fields. Velocity and range columns depend on the requested
/// table type and are optional; some object classes omit them.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct VectorRecord {
    #[serde(rename = "JDTDB")]
    pub jd: f64,
    #[serde(rename = "CalendarDate(TDB)")]
    pub date: String,
    #[serde(rename = "X")]
    pub x: f64, // AU
    #[serde(rename = "Y")]
    pub y: f64, // AU
    #[serde(rename = "Z")]
    pub z: f64, // AU
    #[serde(rename = "VX", default)]
    pub vx: Option<f64>, // AU/day
    #[serde(rename = "VY", default)]
    pub vy: Option<f64>, // AU/day
    #[serde(rename = "VZ", default)]
    pub vz: Option<f64>, // AU/day
    #[serde(rename = "LT", default)]
    pub lt: Option<f64>, // day
    #[serde(rename = "RG", default)]
    pub rg: Option<f64>, // AU
    #[serde(rename = "RR", default)]
    pub rr: Option<f64>, // AU/day
}

impl VectorRecord {
    pub fn position(&self) -> nalgebra::Vector3<f64> {
        nalgebra::Vector3::new(self.x, self.y, self.z)
    }
}

/// Markers the service embeds in an otherwise well-formed response when the
/// requested object has no usable ephemeris.
const NO_EPHEMERIS_MARKERS: [&str; 3] = [
    "No ephemeris for target",
    "No matches found",
    "Cannot determine target",
];

/// Parse the raw text of a vector-table response into typed records.
///
/// The data block sits between `$$SOE` and `$$EOE`; the CSV header is the last
/// line containing `JDTDB` before the block. The header has its spaces stripped
/// (so column names match the serde renames) and each line loses its trailing
/// comma, which would otherwise read as an empty extra column.
///
/// Argument
/// --------
/// * `response`: the raw service response
/// * `object`: the queried body, for error context
///
/// Return
/// ------
/// * The decoded records, or the distinct [`HeliopathError::NoEphemeris`] /
///   [`HeliopathError::MalformedResponse`] failure kinds
pub fn parse_vector_table(
    response: &str,
    object: &BodyId,
) -> Result<Vec<VectorRecord>, HeliopathError> {
    if NO_EPHEMERIS_MARKERS.iter().any(|m| response.contains(m)) {
        return Err(HeliopathError::NoEphemeris {
            object: object.to_string(),
        });
    }

    let data_regex = Regex::new(r"(?s)\$\$SOE\r?\n(.*?)\$\$EOE").unwrap();
    let data_block = data_regex
        .captures(response)
        .and_then(|c| c.get(1))
        .ok_or_else(|| HeliopathError::MalformedResponse {
            reason: "missing $$SOE/$$EOE data block".to_string(),
        })?
        .as_str();

    let header = response
        .split("$$SOE")
        .next()
        .unwrap_or("")
        .lines()
        .filter(|line| line.contains("JDTDB"))
        .next_back()
        .ok_or_else(|| HeliopathError::MalformedResponse {
            reason: "missing JDTDB column header".to_string(),
        })?
        .replace(' ', "");

    let mut csv_text = String::with_capacity(header.len() + data_block.len());
    csv_text.push_str(strip_trailing_comma(&header));
    for line in data_block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        csv_text.push('\n');
        csv_text.push_str(strip_trailing_comma(line));
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());
    csv_reader
        .deserialize::<VectorRecord>()
        .map(|record| record.map_err(HeliopathError::from))
        .collect()
}

fn strip_trailing_comma(line: &str) -> &str {
    line.trim_end().trim_end_matches(',')
}

#[cfg(test)]
mod response_tests {
    use super::*;

    const FAKE_RESPONSE: &str = "
Reference frame : Ecliptic of J2000.0
*******************************************************************************
            JDTDB,            Calendar Date (TDB),                      X,                      Y,                      Z,                     VX,                     VY,                     VZ,                     LT,                     RG,                     RR,
**************************************************************************************************************************
$$SOE
2459400.032916666, A.D. 2021-Jul-04 12:47:24.0000,  2.195672929244244E-01, -9.108330730147444E-01, -3.948423288985838E-01,  1.651033140193500E-02,  3.435775135200000E-03,  1.489279200000000E-03,  5.930000000000000E-03,  1.026646024074665E+00, -1.203700000000000E-04,
2460672.574629629, A.D. 2024-Dec-28 01:47:28.0000, -1.107728032684787E-01,  8.965650072539966E-01,  3.886517577153460E-01, -1.720104339000000E-02, -1.852300000000000E-03, -8.030000000000000E-04,  5.650000000000000E-03,  9.836909756471100E-01,  9.470000000000000E-05,
$$EOE
**************************************************************************************************************************
";

    #[test]
    fn test_parse_vector_table() {
        let records = parse_vector_table(FAKE_RESPONSE, &BodyId::Int(399)).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.jd, 2459400.032916666);
        assert_eq!(first.date, "A.D. 2021-Jul-04 12:47:24.0000");
        assert_eq!(first.x, 0.2195672929244244);
        assert_eq!(first.y, -0.9108330730147444);
        assert_eq!(first.z, -0.3948423288985838);
        assert_eq!(first.vx, Some(0.016510331401935));
        assert_eq!(first.rg, Some(1.026646024074665));
        assert_eq!(first.rr, Some(-0.00012037));

        let second = &records[1];
        assert_eq!(second.jd, 2460672.574629629);
        assert_eq!(second.x, -0.1107728032684787);
    }

    #[test]
    fn test_parse_position_only_table() {
        // VEC_TABLE=1 style payload: no velocity or range columns.
        let response = "
*******************************************************************************
            JDTDB,            Calendar Date (TDB),                      X,                      Y,                      Z,
*******************************************************************************
$$SOE
2459400.032916666, A.D. 2021-Jul-04 12:47:24.0000,  2.195672929244244E-01, -9.108330730147444E-01, -3.948423288985838E-01,
$$EOE
";
        let records = parse_vector_table(response, &BodyId::Int(399)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vx, None);
        assert_eq!(records[0].rg, None);
        assert_eq!(
            records[0].position(),
            nalgebra::Vector3::new(
                0.2195672929244244,
                -0.9108330730147444,
                -0.3948423288985838
            )
        );
    }

    #[test]
    fn test_parse_no_ephemeris_marker() {
        let response = "No ephemeris for target \"Phobos\" prior to A.D. 1900-JAN-04";
        let err = parse_vector_table(response, &BodyId::from("Phobos")).unwrap_err();
        assert!(matches!(err, HeliopathError::NoEphemeris { ref object } if object == "Phobos"));
    }

    #[test]
    fn test_parse_malformed_response() {
        let err = parse_vector_table("short and wrong", &BodyId::Int(499)).unwrap_err();
        assert!(matches!(err, HeliopathError::MalformedResponse { .. }));
    }
}
