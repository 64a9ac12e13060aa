//! STDF V4-2007 record layouts.

use super::{FieldSpec, FormatSpec, Prefixed, Primitive, RecordType, Scalar};

const U1: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::U1));
const U2: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::U2));
const U4: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::U4));
const U8: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::U8));
const I1: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::I1));
const I2: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::I2));
const I4: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::I4));
const R4: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::R4));
const C1: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::C1));
const B1: FormatSpec = FormatSpec::Scalar(Scalar::Fixed(Primitive::B1));
const N1: FormatSpec = FormatSpec::Scalar(Scalar::Nibble);
const CN: FormatSpec = FormatSpec::Scalar(Scalar::Prefixed(Prefixed::Cn));
const SN: FormatSpec = FormatSpec::Scalar(Scalar::Prefixed(Prefixed::Sn));
const BN: FormatSpec = FormatSpec::Scalar(Scalar::Prefixed(Prefixed::Bn));
const DN: FormatSpec = FormatSpec::Scalar(Scalar::Prefixed(Prefixed::Dn));
const VN: FormatSpec = FormatSpec::Variant;

/// `Kx` array of the given element format.
const fn kx(element: FormatSpec) -> FormatSpec {
    match element {
        FormatSpec::Scalar(s) => FormatSpec::Array(s),
        _ => panic!("array elements must be scalar"),
    }
}

macro_rules! record {
    ($major:literal, $minor:literal, $name:literal { $($field:literal: $format:expr),* $(,)? }) => {
        RecordType::new($major, $minor, $name, {
            const FIELDS: &[FieldSpec] = &[$(FieldSpec::new($field, $format)),*];
            FIELDS
        })
    };
}

// The variable-width `Uf`/`Cf` fields of STR use the sizes a writer assumes
// when the corresponding `*_SIZE` field holds its default.
pub(super) const RECORD_TYPES: &[RecordType] = &[
    record!(0, 10, "FAR" { "CPU_TYPE": U1, "STDF_VER": U1 }),
    record!(0, 20, "ATR" { "MOD_TIM": U4, "CMD_LINE": CN }),
    record!(0, 30, "VUR" { "UPD_CNT": U1, "UPD_NAM": kx(CN) }),
    record!(1, 10, "MIR" {
        "SETUP_T": U4, "START_T": U4, "STAT_NUM": U1, "MODE_COD": C1,
        "RTST_COD": C1, "PROT_COD": C1, "BURN_TIM": U2, "CMOD_COD": C1,
        "LOT_ID": CN, "PART_TYP": CN, "NODE_NAM": CN, "TSTR_TYP": CN,
        "JOB_NAM": CN, "JOB_REV": CN, "SBLOT_ID": CN, "OPER_NAM": CN,
        "EXEC_TYP": CN, "EXEC_VER": CN, "TEST_COD": CN, "TST_TEMP": CN,
        "USER_TXT": CN, "AUX_FILE": CN, "PKG_TYP": CN, "FAMLY_ID": CN,
        "DATE_COD": CN, "FACIL_ID": CN, "FLOOR_ID": CN, "PROC_ID": CN,
        "OPER_FRQ": CN, "SPEC_NAM": CN, "SPEC_VER": CN, "FLOW_ID": CN,
        "SETUP_ID": CN, "DSGN_REV": CN, "ENG_ID": CN, "ROM_COD": CN,
        "SERL_NUM": CN, "SUPR_NAM": CN,
    }),
    record!(1, 20, "MRR" { "FINISH_T": U4, "DISP_COD": C1, "USR_DESC": CN, "EXC_DESC": CN }),
    record!(1, 30, "PCR" {
        "HEAD_NUM": U1, "SITE_NUM": U1, "PART_CNT": U4, "RTST_CNT": U4,
        "ABRT_CNT": U4, "GOOD_CNT": U4, "FUNC_CNT": U4,
    }),
    record!(1, 40, "HBR" {
        "HEAD_NUM": U1, "SITE_NUM": U1, "HBIN_NUM": U2, "HBIN_CNT": U4,
        "HBIN_PF": C1, "HBIN_NAM": CN,
    }),
    record!(1, 50, "SBR" {
        "HEAD_NUM": U1, "SITE_NUM": U1, "SBIN_NUM": U2, "SBIN_CNT": U4,
        "SBIN_PF": C1, "SBIN_NAM": CN,
    }),
    record!(1, 60, "PMR" {
        "PMR_INDX": U2, "CHAN_TYP": U2, "CHAN_NAM": CN, "PHY_NAM": CN,
        "LOG_NAM": CN, "HEAD_NUM": U1, "SITE_NUM": U1,
    }),
    record!(1, 62, "PGR" { "GRP_INDX": U2, "GRP_NAM": CN, "INDX_CNT": U2, "PMR_INDX": kx(U2) }),
    record!(1, 63, "PLR" {
        "GRP_CNT": U2, "GRP_INDX": kx(U2), "GRP_MODE": kx(U2), "GRP_RADX": kx(U1),
        "PGM_CHAR": kx(CN), "RTN_CHAR": kx(CN), "PGM_CHAL": kx(CN), "RTN_CHAL": kx(CN),
    }),
    record!(1, 70, "RDR" { "NUM_BINS": U2, "RTST_BIN": kx(U2) }),
    record!(1, 80, "SDR" {
        "HEAD_NUM": U1, "SITE_GRP": U1, "SITE_CNT": U1, "SITE_NUM": kx(U1),
        "HAND_TYP": CN, "HAND_ID": CN, "CARD_TYP": CN, "CARD_ID": CN,
        "LOAD_TYP": CN, "LOAD_ID": CN, "DIB_TYP": CN, "DIB_ID": CN,
        "CABL_TYP": CN, "CABL_ID": CN, "CONT_TYP": CN, "CONT_ID": CN,
        "LASR_TYP": CN, "LASR_ID": CN, "EXTR_TYP": CN, "EXTR_ID": CN,
    }),
    record!(1, 90, "PSR" {
        "CONT_FLG": B1, "PSR_INDX": U2, "PSR_NAM": CN, "OPT_FLG": B1,
        "TOTP_CNT": U2, "LOCP_CNT": U2, "PAT_BGN": kx(U8), "PAT_END": kx(U8),
        "PAT_FILE": kx(CN), "PAT_LBL": kx(CN), "FILE_UID": kx(CN),
        "ATPG_DSC": kx(CN), "SRC_ID": kx(CN),
    }),
    record!(1, 91, "NMR" {
        "CONT_FLG": B1, "TOTM_CNT": U2, "LOCM_CNT": U2, "PMR_INDX": kx(U2),
        "ATPG_NAM": kx(CN),
    }),
    record!(1, 92, "CNR" { "CHN_NUM": U2, "BIT_POS": U4, "CELL_NAM": SN }),
    record!(1, 93, "SSR" { "SSR_NAM": CN, "CHN_CNT": U2, "CHN_LIST": kx(U2) }),
    record!(1, 94, "CDR" {
        "CONT_FLG": B1, "CDR_INDX": U2, "CHN_NAM": CN, "CHN_LEN": U4,
        "SIN_PIN": U2, "SOUT_PIN": U2, "MSTR_CNT": U1, "M_CLKS": kx(U2),
        "SLAV_CNT": U1, "S_CLKS": kx(U2), "INV_VAL": U1, "LST_CNT": U2,
        "CELL_LST": kx(SN),
    }),
    record!(2, 10, "WIR" { "HEAD_NUM": U1, "SITE_GRP": U1, "START_T": U4, "WAFER_ID": CN }),
    record!(2, 20, "WRR" {
        "HEAD_NUM": U1, "SITE_GRP": U1, "FINISH_T": U4, "PART_CNT": U4,
        "RTST_CNT": U4, "ABRT_CNT": U4, "GOOD_CNT": U4, "FUNC_CNT": U4,
        "WAFER_ID": CN, "FABWF_ID": CN, "FRAME_ID": CN, "MASK_ID": CN,
        "USR_DESC": CN, "EXC_DESC": CN,
    }),
    record!(2, 30, "WCR" {
        "WAFR_SIZ": R4, "DIE_HT": R4, "DIE_WID": R4, "WF_UNITS": U1,
        "WF_FLAT": C1, "CENTER_X": I2, "CENTER_Y": I2, "POS_X": C1, "POS_Y": C1,
    }),
    record!(5, 10, "PIR" { "HEAD_NUM": U1, "SITE_NUM": U1 }),
    record!(5, 20, "PRR" {
        "HEAD_NUM": U1, "SITE_NUM": U1, "PART_FLG": B1, "NUM_TEST": U2,
        "HARD_BIN": U2, "SOFT_BIN": U2, "X_COORD": I2, "Y_COORD": I2,
        "TEST_T": U4, "PART_ID": CN, "PART_TXT": CN, "PART_FIX": BN,
    }),
    record!(10, 30, "TSR" {
        "HEAD_NUM": U1, "SITE_NUM": U1, "TEST_TYP": C1, "TEST_NUM": U4,
        "EXEC_CNT": U4, "FAIL_CNT": U4, "ALRM_CNT": U4, "TEST_NAM": CN,
        "SEQ_NAME": CN, "TEST_LBL": CN, "OPT_FLAG": B1, "TEST_TIM": R4,
        "TEST_MIN": R4, "TEST_MAX": R4, "TST_SUMS": R4, "TST_SQRS": R4,
    }),
    record!(15, 10, "PTR" {
        "TEST_NUM": U4, "HEAD_NUM": U1, "SITE_NUM": U1, "TEST_FLG": B1,
        "PARM_FLG": B1, "RESULT": R4, "TEST_TXT": CN, "ALARM_ID": CN,
        "OPT_FLAG": B1, "RES_SCAL": I1, "LLM_SCAL": I1, "HLM_SCAL": I1,
        "LO_LIMIT": R4, "HI_LIMIT": R4, "UNITS": CN, "C_RESFMT": CN,
        "C_LLMFMT": CN, "C_HLMFMT": CN, "LO_SPEC": R4, "HI_SPEC": R4,
    }),
    record!(15, 15, "MPR" {
        "TEST_NUM": U4, "HEAD_NUM": U1, "SITE_NUM": U1, "TEST_FLG": B1,
        "PARM_FLG": B1, "RTN_ICNT": U2, "RSLT_CNT": U2, "RTN_STAT": kx(N1),
        "RTN_RSLT": kx(R4), "TEST_TXT": CN, "ALARM_ID": CN, "OPT_FLAG": B1,
        "RES_SCAL": I1, "LLM_SCAL": I1, "HLM_SCAL": I1, "LO_LIMIT": R4,
        "HI_LIMIT": R4, "START_IN": R4, "INCR_IN": R4, "RTN_INDX": kx(U2),
        "UNITS": CN, "UNITS_IN": CN, "C_RESFMT": CN, "C_LLMFMT": CN,
        "C_HLMFMT": CN, "LO_SPEC": R4, "HI_SPEC": R4,
    }),
    record!(15, 20, "FTR" {
        "TEST_NUM": U4, "HEAD_NUM": U1, "SITE_NUM": U1, "TEST_FLG": B1,
        "OPT_FLAG": B1, "CYCL_CNT": U4, "REL_VADR": U4, "REPT_CNT": U4,
        "NUM_FAIL": U4, "XFAIL_AD": I4, "YFAIL_AD": I4, "VECT_OFF": I2,
        "RTN_ICNT": U2, "PGM_ICNT": U2, "RTN_INDX": kx(U2), "RTN_STAT": kx(N1),
        "PGM_INDX": kx(U2), "PGM_STAT": kx(N1), "FAIL_PIN": DN, "VECT_NAM": CN,
        "TIME_SET": CN, "OP_CODE": CN, "TEST_TXT": CN, "ALARM_ID": CN,
        "PROG_TXT": CN, "RSLT_TXT": CN, "PATG_NUM": U1, "SPIN_MAP": DN,
    }),
    record!(15, 30, "STR" {
        "CONT_FLG": B1, "TEST_NUM": U4, "HEAD_NUM": U1, "SITE_NUM": U1,
        "PSR_REF": U2, "TEST_FLG": B1, "LOG_TYP": CN, "TEST_TXT": CN,
        "ALARM_ID": CN, "PROG_TXT": CN, "RSLT_TXT": CN, "Z_VAL": U1,
        "FMU_FLG": B1, "MASK_MAP": DN, "FAL_MAP": DN, "CYC_CNT": U8,
        "TOTF_CNT": U4, "TOTL_CNT": U4, "CYC_BASE": U8, "BIT_BASE": U4,
        "COND_CNT": U2, "LIM_CNT": U2, "CYC_SIZE": U1, "PMR_SIZE": U1,
        "CHN_SIZE": U1, "PAT_SIZE": U1, "BIT_SIZE": U1, "U1_SIZE": U1,
        "U2_SIZE": U1, "U3_SIZE": U1, "UTX_SIZE": U1, "CAP_BGN": U2,
        "LIM_INDX": kx(U2), "LIM_SPEC": kx(U4), "COND_LST": kx(CN),
        "CYCO_CNT": U2, "CYC_OFST": kx(U4), "PMR_CNT": U2, "PMR_INDX": kx(U2),
        "CHN_CNT": U2, "CHN_NUM": kx(U2), "EXP_CNT": U2, "EXP_DATA": kx(U1),
        "CAP_CNT": U2, "CAP_DATA": kx(U1), "NEW_CNT": U2, "NEW_DATA": kx(U1),
        "PAT_CNT": U2, "PAT_NUM": kx(U4), "BPOS_CNT": U2, "BIT_POS": kx(U4),
        "USR1_CNT": U2, "USR1": kx(U4), "USR2_CNT": U2, "USR2": kx(U4),
        "USR3_CNT": U2, "USR3": kx(U4), "TXT_CNT": U2, "USER_TXT": kx(CN),
    }),
    record!(20, 10, "BPS" { "SEQ_NAME": CN }),
    record!(20, 20, "EPS" {}),
    record!(50, 10, "GDR" { "GEN_DATA": VN }),
    record!(50, 30, "DTR" { "TEXT_DAT": CN }),
];
