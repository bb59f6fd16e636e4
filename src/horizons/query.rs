use itertools::Itertools;

use crate::constants::{BodyId, JD};

fn jd_tlist(jd_list: &[JD]) -> String {
    jd_list.iter().join(",")
}

/// Build a batched vector-table query for an explicit epoch list.
///
/// One query covers all requested epochs; the epochs the service actually
/// returns are reconciled against the request downstream by the epoch matcher.
///
/// Argument
/// --------
/// * `object`: body identifier, used as the `COMMAND` value
/// * `center`: coordinate center (site@body, e.g. `500@10` for the Sun)
/// * `jd_list`: requested epochs in Julian Date
///
/// Return
/// ------
/// * The query body in the service's batch-file syntax
pub(crate) fn tlist_query(object: &BodyId, center: &str, jd_list: &[JD]) -> String {
    format!(
        "
!$$SOF
COMMAND='{}'
OBJ_DATA='NO'
MAKE_EPHEM='YES'
TABLE_TYPE='VECTORS'
CENTER='{}'
TLIST_TYPE=JD
TLIST={}
CSV_FORMAT=YES
REF_SYSTEM=ICRF
OUT_UNITS=AU-D
REF_PLANE=ECLIPTIC
VEC_TABLE=3
",
        object,
        center,
        jd_tlist(jd_list)
    )
}

/// Build a vector-table query over a start/stop/step range.
///
/// Used for drawing continuous orbit lines; the response is taken as-is with
/// no epoch matching or interpolation.
///
/// Argument
/// --------
/// * `object`: body identifier, used as the `COMMAND` value
/// * `center`: coordinate center (site@body)
/// * `start`, `stop`: range bounds in Julian Date
/// * `step`: service step-size string (e.g. `1 d`, `12 h`)
///
/// Return
/// ------
/// * The query body in the service's batch-file syntax
pub(crate) fn range_query(object: &BodyId, center: &str, start: JD, stop: JD, step: &str) -> String {
    format!(
        "
!$$SOF
COMMAND='{}'
OBJ_DATA='NO'
MAKE_EPHEM='YES'
TABLE_TYPE='VECTORS'
CENTER='{}'
START_TIME='JD{:.8}'
STOP_TIME='JD{:.8}'
STEP_SIZE='{}'
CSV_FORMAT=YES
REF_SYSTEM=ICRF
OUT_UNITS=AU-D
REF_PLANE=ECLIPTIC
VEC_TABLE=3
",
        object, center, start, stop, step
    )
}
