//! Resolution of array lengths stored in sibling fields.

use alloc::string::{String, ToString};

use thiserror::Error;

use super::data::Fields;

/// Array fields and the fields holding their lengths, by record.
const COUNT_FIELDS: &[(&str, &[&str], &str)] = &[
    ("VUR", &["UPD_NAM"], "UPD_CNT"),
    ("PGR", &["PMR_INDX"], "INDX_CNT"),
    (
        "PLR",
        &[
            "GRP_INDX", "GRP_MODE", "GRP_RADX", "PGM_CHAR", "RTN_CHAR", "PGM_CHAL", "RTN_CHAL",
        ],
        "GRP_CNT",
    ),
    ("RDR", &["RTST_BIN"], "NUM_BINS"),
    ("SDR", &["SITE_NUM"], "SITE_CNT"),
    (
        "PSR",
        &[
            "PAT_BGN", "PAT_END", "PAT_FILE", "PAT_LBL", "FILE_UID", "ATPG_DSC", "SRC_ID",
        ],
        "LOCP_CNT",
    ),
    ("NMR", &["PMR_INDX", "ATPG_NAM"], "LOCM_CNT"),
    ("SSR", &["CHN_LIST"], "CHN_CNT"),
    ("CDR", &["M_CLKS"], "MSTR_CNT"),
    ("CDR", &["S_CLKS"], "SLAV_CNT"),
    ("CDR", &["CELL_LST"], "LST_CNT"),
    ("MPR", &["RTN_STAT", "RTN_INDX"], "RTN_ICNT"),
    ("MPR", &["RTN_RSLT"], "RSLT_CNT"),
    ("FTR", &["RTN_INDX", "RTN_STAT"], "RTN_ICNT"),
    ("FTR", &["PGM_INDX", "PGM_STAT"], "PGM_ICNT"),
    ("STR", &["LIM_INDX", "LIM_SPEC"], "LIM_CNT"),
    ("STR", &["COND_LST"], "COND_CNT"),
    ("STR", &["CYC_OFST"], "CYCO_CNT"),
    ("STR", &["PMR_INDX"], "PMR_CNT"),
    ("STR", &["CHN_NUM"], "CHN_CNT"),
    ("STR", &["EXP_DATA"], "EXP_CNT"),
    ("STR", &["CAP_DATA"], "CAP_CNT"),
    ("STR", &["NEW_DATA"], "NEW_CNT"),
    ("STR", &["PAT_NUM"], "PAT_CNT"),
    ("STR", &["BIT_POS"], "BPOS_CNT"),
    ("STR", &["USR1"], "USR1_CNT"),
    ("STR", &["USR2"], "USR2_CNT"),
    ("STR", &["USR3"], "USR3_CNT"),
    ("STR", &["USER_TXT"], "TXT_CNT"),
];

/// An error resolving the length of an array field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CountError {
    /// No field is known to hold the length of this array.
    #[error("No count field is known for {record}.{field}.")]
    Unmapped { record: String, field: String },
    /// The count field has not been decoded, or does not hold an integer.
    #[error("Count field {count} for {record}.{field} is unavailable.")]
    Unavailable {
        record: String,
        field: String,
        count: &'static str,
    },
}

/// The name of the field holding the length of an array field.
pub fn count_field(record: &str, field: &str) -> Option<&'static str> {
    COUNT_FIELDS
        .iter()
        .find(|(r, fields, _)| *r == record && fields.iter().any(|f| *f == field))
        .map(|(_, _, count)| *count)
}

/// Resolve the length of an array field from the fields decoded before it.
pub fn resolve(record: &str, field: &str, fields: &Fields<'_>) -> Result<usize, CountError> {
    let Some(count) = count_field(record, field) else {
        return Err(CountError::Unmapped {
            record: record.to_string(),
            field: field.to_string(),
        });
    };

    fields
        .get(count)
        .and_then(|v| v.as_u64())
        .map(|n| n as usize)
        .ok_or_else(|| CountError::Unavailable {
            record: record.to_string(),
            field: field.to_string(),
            count,
        })
}
