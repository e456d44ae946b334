//! Attribute type checkers.
//!
//! Every schema attribute carries an [`AttrType`] tag. The tag resolves to a
//! plain checker function through [`AttrType::checker`]; checkers only
//! produce the message body, [`AttrType::check`] adds the element/attribute
//! prefix and the line suffix.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// A checker returns the body of the diagnostic for an invalid value.
pub type Checker = fn(&str) -> Result<(), String>;

/// Type tag of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrType {
    /// Free text (Zeichenkette)
    Zk,
    Zahl,
    Betrag,
    Einzelstrecke,
    Datum,
    Uhrzeit,
    Zeit,
    Bahnlaenge,
    Zeitmessung,
    Land,
    NachweisBahn,
    Relativ,
    WkArt,
    /// Race type in result lists, adds `A` and `N`
    WkArtErg,
    Technik,
    Ausuebung,
    GeschlechtWk,
    GeschlechtErw,
    GeschlechtPf,
    Bestenliste,
    WertTyp,
    JgAk,
    MeldegeldTyp,
    ReaktionArt,
    NachtragFlag,
    NichtwertungGrund,
}

impl AttrType {
    pub fn checker(self) -> Checker {
        match self {
            AttrType::Zk => check_zk,
            AttrType::Zahl => check_zahl,
            AttrType::Betrag => check_betrag,
            AttrType::Einzelstrecke => check_einzelstrecke,
            AttrType::Datum => check_datum,
            AttrType::Uhrzeit => check_uhrzeit,
            AttrType::Zeit => check_zeit,
            AttrType::Bahnlaenge => check_bahnlaenge,
            AttrType::Zeitmessung => check_zeitmessung,
            AttrType::Land => check_land,
            AttrType::NachweisBahn => check_nachweis_bahn,
            AttrType::Relativ => check_relativ,
            AttrType::WkArt => check_wk_art,
            AttrType::WkArtErg => check_wk_art_erg,
            AttrType::Technik => check_technik,
            AttrType::Ausuebung => check_ausuebung,
            AttrType::GeschlechtWk => check_geschlecht_wk,
            AttrType::GeschlechtErw => check_geschlecht_erw,
            AttrType::GeschlechtPf => check_geschlecht_pf,
            AttrType::Bestenliste => check_bestenliste,
            AttrType::WertTyp => check_wert_typ,
            AttrType::JgAk => check_jgak,
            AttrType::MeldegeldTyp => check_meldegeld_typ,
            AttrType::ReaktionArt => check_reaktion_art,
            AttrType::NachtragFlag => check_nachtrag_flag,
            AttrType::NichtwertungGrund => check_nichtwertung_grund,
        }
    }

    /// Check `value` at 1-based position `index` of `element`.
    pub fn check(self, element: &str, index: usize, value: &str, line: usize) -> Option<String> {
        (self.checker())(value)
            .err()
            .map(|body| format!("Element {element}, attribute {index}: {body} (line {line})"))
    }
}

static ZAHL_REGEX: OnceLock<Regex> = OnceLock::new();
static BETRAG_REGEX: OnceLock<Regex> = OnceLock::new();
static DATUM_REGEX: OnceLock<Regex> = OnceLock::new();
static UHRZEIT_REGEX: OnceLock<Regex> = OnceLock::new();
static ZEIT_REGEX: OnceLock<Regex> = OnceLock::new();
static LAND_REGEX: OnceLock<Regex> = OnceLock::new();
static JGAK_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_zahl_regex() -> &'static Regex {
    ZAHL_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Failed to compile Zahl regex"))
}

fn get_betrag_regex() -> &'static Regex {
    BETRAG_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]+,[0-9]{2}$").expect("Failed to compile Betrag regex")
    })
}

fn get_datum_regex() -> &'static Regex {
    DATUM_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("Failed to compile Datum regex")
    })
}

fn get_uhrzeit_regex() -> &'static Regex {
    UHRZEIT_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{2}):([0-9]{2})$").expect("Failed to compile Uhrzeit regex")
    })
}

fn get_zeit_regex() -> &'static Regex {
    ZEIT_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{2})$")
            .expect("Failed to compile Zeit regex")
    })
}

fn get_land_regex() -> &'static Regex {
    LAND_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("Failed to compile Land regex"))
}

fn get_jgak_regex() -> &'static Regex {
    JGAK_REGEX.get_or_init(|| {
        Regex::new(r"^(?:[0-9]{1,4}|[ABCDEJ]|[0-9]{2,3}\+)$")
            .expect("Failed to compile JG/AK regex")
    })
}

fn one_of(value: &str, allowed: &[&str], label: &str) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "invalid {label} '{value}' (allowed: {})",
            allowed.join(", ")
        ))
    }
}

fn invalid_zahl(value: &str) -> String {
    format!("invalid Zahl '{value}'")
}

fn time_out_of_range(value: &str) -> String {
    format!("time out of range '{value}'")
}

// Two-digit captures always fit.
fn capture_number(caps: &regex::Captures<'_>, group: usize) -> u32 {
    caps[group].parse().unwrap_or(u32::MAX)
}

fn check_zk(_value: &str) -> Result<(), String> {
    Ok(())
}

fn check_zahl(value: &str) -> Result<(), String> {
    if get_zahl_regex().is_match(value) {
        Ok(())
    } else {
        Err(invalid_zahl(value))
    }
}

fn check_betrag(value: &str) -> Result<(), String> {
    if get_betrag_regex().is_match(value) {
        Ok(())
    } else {
        Err(format!("invalid Betrag '{value}' (expected x,yy)"))
    }
}

fn check_einzelstrecke(value: &str) -> Result<(), String> {
    if !get_zahl_regex().is_match(value) {
        return Err(invalid_zahl(value));
    }
    match value.parse::<u64>() {
        Ok(0) | Ok(1..=25_000) => Ok(()),
        _ => Err(format!(
            "Einzelstrecke out of range '{value}' (allowed 1..25000 or 0)"
        )),
    }
}

fn check_datum(value: &str) -> Result<(), String> {
    if !get_datum_regex().is_match(value) {
        return Err(format!("invalid Datum '{value}' (expected TT.MM.JJJJ)"));
    }
    NaiveDate::parse_from_str(value, "%d.%m.%Y")
        .map(|_| ())
        .map_err(|_| format!("impossible date '{value}'"))
}

fn check_uhrzeit(value: &str) -> Result<(), String> {
    let caps = get_uhrzeit_regex()
        .captures(value)
        .ok_or_else(|| format!("invalid Uhrzeit '{value}' (expected HH:MM)"))?;

    let (hour, minute) = (capture_number(&caps, 1), capture_number(&caps, 2));
    if hour <= 23 && minute <= 59 {
        Ok(())
    } else {
        Err(time_out_of_range(value))
    }
}

fn check_zeit(value: &str) -> Result<(), String> {
    let caps = get_zeit_regex()
        .captures(value)
        .ok_or_else(|| format!("invalid Zeit '{value}' (expected HH:MM:SS,hh)"))?;

    let hours = capture_number(&caps, 1);
    let minutes = capture_number(&caps, 2);
    let seconds = capture_number(&caps, 3);
    let hundredths = capture_number(&caps, 4);
    if hours <= 23 && minutes <= 59 && seconds <= 59 && hundredths <= 99 {
        Ok(())
    } else {
        Err(time_out_of_range(value))
    }
}

fn check_bahnlaenge(value: &str) -> Result<(), String> {
    one_of(value, &["16", "20", "25", "33", "50", "FW", "X"], "Bahnlänge")
}

fn check_zeitmessung(value: &str) -> Result<(), String> {
    one_of(
        value,
        &["HANDZEIT", "AUTOMATISCH", "HALBAUTOMATISCH"],
        "Zeitmessung",
    )
}

fn check_land(value: &str) -> Result<(), String> {
    if get_land_regex().is_match(value) {
        Ok(())
    } else {
        Err(format!(
            "invalid Land '{value}' (expected FINA code, e.g., GER)"
        ))
    }
}

fn check_nachweis_bahn(value: &str) -> Result<(), String> {
    one_of(value, &["25", "50", "FW", "AL"], "Bahnlänge")
}

fn check_relativ(value: &str) -> Result<(), String> {
    one_of(value, &["J", "N"], "Relative Angabe")
}

fn check_wk_art(value: &str) -> Result<(), String> {
    one_of(value, &["V", "Z", "F", "E"], "Wettkampfart")
}

fn check_wk_art_erg(value: &str) -> Result<(), String> {
    one_of(value, &["V", "Z", "F", "E", "A", "N"], "Wettkampfart")
}

fn check_technik(value: &str) -> Result<(), String> {
    one_of(value, &["F", "R", "B", "S", "L", "X"], "Technik")
}

fn check_ausuebung(value: &str) -> Result<(), String> {
    one_of(value, &["GL", "BE", "AR", "ST", "WE", "GB", "X"], "Ausübung")
}

fn check_geschlecht_wk(value: &str) -> Result<(), String> {
    one_of(value, &["M", "W", "X"], "Geschlecht")
}

fn check_geschlecht_erw(value: &str) -> Result<(), String> {
    one_of(value, &["M", "W", "X", "D"], "Geschlecht")
}

fn check_geschlecht_pf(value: &str) -> Result<(), String> {
    one_of(value, &["M", "W", "D"], "Geschlecht")
}

fn check_bestenliste(value: &str) -> Result<(), String> {
    one_of(value, &["SW", "EW", "PA", "MS", "KG", "XX"], "Zuordnung")
}

fn check_wert_typ(value: &str) -> Result<(), String> {
    one_of(value, &["JG", "AK"], "Wertungstyp")
}

fn check_jgak(value: &str) -> Result<(), String> {
    if get_jgak_regex().is_match(value) {
        Ok(())
    } else {
        Err(format!("invalid JG/AK '{value}'"))
    }
}

const MELDEGELD_TYPEN: [&str; 5] = [
    "MELDEGELDPAUSCHALE",
    "EINZELMELDEGELD",
    "STAFFELMELDEGELD",
    "WKMELDEGELD",
    "MANNSCHAFTMELDEGELD",
];

fn check_meldegeld_typ(value: &str) -> Result<(), String> {
    if MELDEGELD_TYPEN.contains(&value.to_uppercase().as_str()) {
        Ok(())
    } else {
        Err(format!("invalid Meldegeld Typ '{value}'"))
    }
}

fn check_reaktion_art(value: &str) -> Result<(), String> {
    one_of(value, &["+", "-"], "Reaktionsart")
}

fn check_nachtrag_flag(value: &str) -> Result<(), String> {
    one_of(value, &["E", "F", "N"], "Nachtragskennzeichen")
}

fn check_nichtwertung_grund(value: &str) -> Result<(), String> {
    one_of(value, &["DS", "NA", "AB", "AU", "ZU"], "Grund der Nichtwertung")
}
