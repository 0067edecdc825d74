//! Record layouts for the FBI UCR master files.
//!
//! Offsets follow the published national master-file record layouts.
//! The Cargo Theft file interleaves two record types, distinguished by
//! the first two characters of each line:
//!
//! - `BH` batch header - one record per reporting agency,
//! - `IR` incident report - one record per cargo theft incident.
//!
//! Incident report ranges are sparse: segments the converter does not
//! decode (offense detail blocks, victim/property repeats) are skipped,
//! which layouts allow as gaps.
//!
//! The Human Trafficking file has a single record type and no tag: every
//! line is one agency's annual return, a 16-field header followed by 12
//! one-character monthly report codes and twelve 75-character monthly
//! blocks of fifteen 5-character counts.

use crate::schema::FieldKind::{Float, Int, Str};
use crate::schema::{FieldSpec, RecordLayout};

/// Cargo Theft batch header (`BH`): agency identification and
/// population figures. Record width 172.
pub fn batch_header() -> RecordLayout {
    RecordLayout::tagged(
        "batch_headers",
        "BH",
        vec![
            FieldSpec::new("record_type", 0, 2, Str),
            FieldSpec::new("state_code", 2, 4, Str),
            FieldSpec::new("ori", 4, 13, Str),
            FieldSpec::new("city_name", 13, 37, Str),
            FieldSpec::new("population_group", 37, 39, Str),
            FieldSpec::new("country_division", 39, 40, Str),
            FieldSpec::new("country_region", 40, 41, Str),
            FieldSpec::new("agency_indicator", 41, 42, Str),
            FieldSpec::new("core_city", 42, 43, Str),
            FieldSpec::new("covered_by_ori", 43, 52, Str),
            FieldSpec::new("fbi_field_office", 52, 56, Str),
            FieldSpec::new("judicial_district", 56, 60, Str),
            FieldSpec::new("current_population_1", 60, 69, Int),
            FieldSpec::new("ucr_county_code_1", 69, 72, Str),
            FieldSpec::new("msa_code_1", 72, 75, Str),
            FieldSpec::new("last_population_1", 75, 84, Int),
            FieldSpec::new("current_population_2", 84, 93, Int),
            FieldSpec::new("ucr_county_code_2", 93, 96, Str),
            FieldSpec::new("msa_code_2", 96, 99, Str),
            FieldSpec::new("last_population_2", 99, 108, Int),
            FieldSpec::new("current_population_3", 108, 117, Int),
            FieldSpec::new("ucr_county_code_3", 117, 120, Str),
            FieldSpec::new("msa_code_3", 120, 123, Str),
            FieldSpec::new("last_population_3", 123, 132, Int),
            FieldSpec::new("master_file_year", 132, 136, Str),
            FieldSpec::new("monthly_activity", 136, 148, Str),
            FieldSpec::new("agency_name", 148, 172, Str),
        ],
    )
}

/// Cargo Theft incident report (`IR`): one incident with stolen and
/// recovered values. Record width 439, sparsely decoded.
pub fn incident_report() -> RecordLayout {
    RecordLayout::tagged(
        "incident_reports",
        "IR",
        vec![
            FieldSpec::new("record_type", 0, 2, Str),
            FieldSpec::new("ori", 2, 11, Str),
            FieldSpec::new("agency_name", 11, 35, Str),
            FieldSpec::new("incident_number", 35, 47, Str),
            FieldSpec::new("incident_date", 47, 55, Str),
            FieldSpec::new("data_source", 55, 56, Str),
            FieldSpec::new("report_date_indicator", 56, 57, Str),
            FieldSpec::new("incident_hour", 57, 59, Str),
            FieldSpec::new("cleared_exceptionally", 59, 60, Str),
            FieldSpec::new("cargo_theft_offense_code", 60, 63, Str),
            FieldSpec::new("location_code", 63, 65, Str),
            FieldSpec::new("stolen_property_description_code", 128, 130, Str),
            FieldSpec::new("stolen_value", 130, 139, Float),
            FieldSpec::new("recovered_date", 139, 147, Str),
            FieldSpec::new("recovered_value", 147, 156, Float),
            FieldSpec::new("unknown_offender", 408, 410, Str),
            FieldSpec::new("offender_count", 410, 412, Str),
            FieldSpec::new("arrestee_count", 437, 439, Str),
        ],
    )
}

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// The fifteen 5-character counts repeated in each monthly block,
/// in record order.
const MONTHLY_COUNTS: [&str; 15] = [
    "offenses_commercial_sex_acts",
    "offenses_involuntary_servitude",
    "offenses_grand_total",
    "unfounded_commercial_sex_acts",
    "unfounded_involuntary_servitude",
    "unfounded_grand_total",
    "actual_offenses_commercial_sex_acts",
    "actual_offenses_involuntary_servitude",
    "actual_offenses_grand_total",
    "cleared_offenses_commercial_sex_acts",
    "cleared_offenses_involuntary_servitude",
    "cleared_offenses_grand_total",
    "clearances_under_18_commercial_sex_acts",
    "clearances_under_18_involuntary_servitude",
    "clearances_under_18_grand_total",
];

/// Start of the monthly count blocks; each month occupies 75 characters.
const MONTHLY_BLOCK_START: usize = 87;
const MONTHLY_BLOCK_WIDTH: usize = 75;
const COUNT_WIDTH: usize = 5;

/// Human Trafficking annual return: a single catch-all layout decoding
/// the whole 987-character record, all fields kept as text. 208 fields:
/// 16 header fields, 12 monthly report codes, 12 x 15 monthly counts.
pub fn human_trafficking() -> RecordLayout {
    let mut fields = vec![
        FieldSpec::new("file_identifier", 0, 1, Str),
        FieldSpec::new("state_code", 1, 3, Str),
        FieldSpec::new("ori_code", 3, 10, Str),
        FieldSpec::new("population_group", 10, 12, Str),
        FieldSpec::new("division", 12, 13, Str),
        FieldSpec::new("year", 13, 15, Str),
        FieldSpec::new("sequence_number", 15, 20, Str),
        FieldSpec::new("core_city_indication", 20, 21, Str),
        FieldSpec::new("covered_by", 21, 28, Str),
        FieldSpec::new("covered_by_group", 28, 29, Str),
        FieldSpec::new("field_office", 29, 33, Str),
        FieldSpec::new("months_reported", 33, 35, Str),
        FieldSpec::new("agency_count", 35, 36, Str),
        FieldSpec::new("population", 36, 45, Str),
        FieldSpec::new("agency_name", 45, 69, Str),
        FieldSpec::new("agency_state", 69, 75, Str),
    ];

    // One report code per month, single characters between the header
    // and the first monthly block.
    let codes_start = 75;
    for (m, month) in MONTHS.iter().enumerate() {
        fields.push(FieldSpec::new(
            format!("{month}_report_code"),
            codes_start + m,
            codes_start + m + 1,
            Str,
        ));
    }

    for (m, month) in MONTHS.iter().enumerate() {
        let base = MONTHLY_BLOCK_START + m * MONTHLY_BLOCK_WIDTH;
        for (i, count) in MONTHLY_COUNTS.iter().enumerate() {
            let start = base + i * COUNT_WIDTH;
            fields.push(FieldSpec::new(
                format!("{month}_{count}"),
                start,
                start + COUNT_WIDTH,
                Str,
            ));
        }
    }

    RecordLayout::untagged("processed", fields)
}
