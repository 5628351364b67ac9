//! Source-to-normalized column name mapping.

use crate::types::DataSet;

/// Lahman column names that do not lower-case into the normalized vocabulary, and their
/// replacements. Every other column is only lower-cased.
pub static FIELD_NAME_MAP: &[(&str, &str)] = &[
    ("playerID", "player_id"),
    ("yearID", "year_id"),
    ("teamID", "team_id"),
    ("lgID", "lg_id"),
    // matches the retrosheet name
    ("GIDP", "gdp"),
    ("2B", "b_2b"),
    ("3B", "b_3b"),
    ("BAOpp", "ba_opp"),
    ("IPouts", "ip_outs"),
    ("InnOuts", "inn_outs"),
    ("franchID", "franch_id"),
    ("divID", "div_id"),
    ("Ghome", "g_home"),
    ("DivWin", "div_win"),
    ("WCWin", "wc_win"),
    ("LgWin", "lg_win"),
    ("WSWin", "ws_win"),
    ("teamIDBR", "team_id_br"),
    ("teamIDlahman45", "team_id_lahman45"),
    ("teamIDretro", "team_id_retro"),
    ("birthYear", "birth_year"),
    ("birthMonth", "birth_month"),
    ("birthDay", "birth_day"),
    ("birthCountry", "birth_country"),
    ("birthState", "birth_state"),
    ("birthCity", "birth_city"),
    ("deathYear", "death_year"),
    ("deathMonth", "death_month"),
    ("deathDay", "death_day"),
    ("deathCountry", "death_country"),
    ("deathState", "death_state"),
    ("deathCity", "death_city"),
    ("nameFirst", "name_first"),
    ("nameLast", "name_last"),
    ("nameGiven", "name_given"),
    ("finalGame", "final_game"),
    ("retroID", "retro_id"),
    ("bbrefID", "bb_ref_id"),
    ("park.key", "park_key"),
    ("park.name", "park_name"),
    ("park.alias", "park_alias"),
];

/// Normalize a single column name: apply [`FIELD_NAME_MAP`], then lower-case.
///
/// ```rust
/// use lahman_wrangle::wrangle::normalize_field_name;
///
/// assert_eq!(normalize_field_name("2B"), "b_2b");
/// assert_eq!(normalize_field_name("HR"), "hr");
/// ```
pub fn normalize_field_name(name: &str) -> String {
    FIELD_NAME_MAP
        .iter()
        .find(|(from, _)| *from == name)
        .map_or(name, |&(_, to)| to)
        .to_lowercase()
}

/// Normalize every column name of `dataset` in place.
pub fn normalize_field_names(dataset: &mut DataSet) {
    dataset.rename_columns(normalize_field_name);
}
