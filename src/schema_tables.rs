//! Element schemas of the four list types.

use crate::lex::Element;
use crate::list_type::ListType;
use crate::schema::{AttrSpec, SchemaTable, opt, req};
use crate::types::AttrType::*;

type Entry = (&'static str, &'static [AttrSpec]);

// Shared by all list types

const ERZEUGER: &[AttrSpec] = &[req(Zk), req(Zk), req(Zk)];

const VERANSTALTUNG: &[AttrSpec] = &[req(Zk), req(Zk), req(Bahnlaenge), req(Zeitmessung)];

const VERANSTALTER: &[AttrSpec] = &[req(Zk)];

const AUSRICHTER: &[AttrSpec] = &[
    req(Zk),
    req(Zk),
    opt(Zk),
    opt(Zk),
    opt(Zk),
    opt(Land),
    opt(Zk),
    opt(Zk),
    req(Zk),
];

/// Contact block used by MELDEADRESSE and ANSPRECHPARTNER.
const KONTAKT: &[AttrSpec] = &[
    req(Zk),
    opt(Zk),
    opt(Zk),
    opt(Zk),
    opt(Land),
    opt(Zk),
    opt(Zk),
    req(Zk),
];

const ABSCHNITT: &[AttrSpec] = &[req(Zahl), req(Datum), req(Uhrzeit), opt(Relativ)];

const WERTUNG: &[AttrSpec] = &[
    req(Zahl),
    req(WkArt),
    req(Zahl),
    req(WertTyp),
    req(JgAk),
    opt(JgAk),
    opt(GeschlechtErw),
    req(Zk),
];

const VEREIN: &[AttrSpec] = &[req(Zk), req(Zahl), req(Zahl), req(Land)];

// Wettkampfdefinitionsliste

const WKDL_VERANSTALTUNGSORT: &[AttrSpec] = &[
    req(Zk),
    opt(Zk),
    opt(Zk),
    req(Zk),
    req(Land),
    opt(Zk),
    opt(Zk),
    opt(Zk),
];

const WKDL_ABSCHNITT: &[AttrSpec] = &[
    req(Zahl),
    req(Datum),
    opt(Uhrzeit),
    opt(Uhrzeit),
    req(Uhrzeit),
    opt(Relativ),
];

const WKDL_WETTKAMPF: &[AttrSpec] = &[
    req(Zahl),
    req(WkArt),
    req(Zahl),
    opt(Zahl),
    req(Einzelstrecke),
    req(Technik),
    req(Ausuebung),
    req(GeschlechtWk),
    req(Bestenliste),
    opt(Zahl),
    opt(WkArt),
];

const WKDL: &[Entry] = &[
    ("ERZEUGER", ERZEUGER),
    ("VERANSTALTUNG", VERANSTALTUNG),
    ("VERANSTALTUNGSORT", WKDL_VERANSTALTUNGSORT),
    ("AUSSCHREIBUNGIMNETZ", &[opt(Zk)]),
    ("VERANSTALTER", VERANSTALTER),
    ("AUSRICHTER", AUSRICHTER),
    ("MELDEADRESSE", KONTAKT),
    ("MELDESCHLUSS", &[req(Datum), req(Uhrzeit)]),
    ("BANKVERBINDUNG", &[opt(Zk), req(Zk), opt(Zk)]),
    ("BESONDERES", &[req(Zk)]),
    ("NACHWEIS", &[req(Datum), opt(Datum), req(NachweisBahn)]),
    ("ABSCHNITT", WKDL_ABSCHNITT),
    ("WETTKAMPF", WKDL_WETTKAMPF),
    ("WERTUNG", WERTUNG),
    ("MELDEGELD", &[req(MeldegeldTyp), req(Betrag), opt(Zahl)]),
];

fn wkdl_cross_rule(element: &Element, line: usize) -> Option<String> {
    let needs_wettkampf = element.name == "MELDEGELD"
        && element.attr(1).to_uppercase() == "WKMELDEGELD"
        && element.attr(3).is_empty();

    needs_wettkampf.then(|| {
        format!("Element MELDEGELD: 'WKMELDEGELD' requires Wettkampfnr (attr 3) (line {line})")
    })
}

// Vereinsmeldeliste

const VML_WETTKAMPF: &[AttrSpec] = &[
    req(Zahl),
    req(WkArt),
    req(Zahl),
    opt(Zahl),
    req(Einzelstrecke),
    req(Technik),
    req(Ausuebung),
    req(GeschlechtWk),
    opt(Zahl),
    opt(WkArt),
];

const VML_PNMELDUNG: &[AttrSpec] = &[
    req(Zk),
    req(Zahl),
    req(Zahl),
    req(GeschlechtPf),
    req(Zahl),
    opt(Zahl),
    opt(Zahl),
    opt(Land),
    opt(Land),
    opt(Land),
];

const VML_HANDICAP: &[AttrSpec] = &[
    req(Zahl),
    opt(Zk),
    opt(Zk),
    req(Zk),
    req(Zk),
    req(Zk),
    opt(Zk),
];

const VML_STMELDUNG: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WertTyp),
    req(JgAk),
    opt(JgAk),
    opt(Zk),
];

const VML_START: &[AttrSpec] = &[req(Zahl), req(Zahl), opt(Zeit)];

const VML: &[Entry] = &[
    ("ERZEUGER", ERZEUGER),
    ("VERANSTALTUNG", VERANSTALTUNG),
    ("ABSCHNITT", ABSCHNITT),
    ("WETTKAMPF", VML_WETTKAMPF),
    ("VEREIN", VEREIN),
    ("ANSPRECHPARTNER", KONTAKT),
    ("KARIMELDUNG", &[req(Zahl), req(Zk), req(Zk)]),
    ("KARIABSCHNITT", &[req(Zahl), req(Zahl), opt(Zk)]),
    ("TRAINER", &[req(Zahl), req(Zk)]),
    ("PNMELDUNG", VML_PNMELDUNG),
    ("HANDICAP", VML_HANDICAP),
    ("STARTPN", VML_START),
    ("STMELDUNG", VML_STMELDUNG),
    ("STARTST", VML_START),
    ("STAFFELPERSON", &[req(Zahl), req(Zahl), req(Zahl), req(Zahl)]),
];

// Result lists

const ERG_WETTKAMPF: &[AttrSpec] = &[
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    opt(Zahl),
    req(Einzelstrecke),
    req(Technik),
    req(Ausuebung),
    req(GeschlechtWk),
    req(Bestenliste),
    opt(Zahl),
    opt(WkArt),
];

const KAMPFGERICHT: &[AttrSpec] = &[req(Zahl), req(Zk), req(Zk), req(Zk)];

const PNZWISCHENZEIT: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    req(Zeit),
];

const PNREAKTION: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WkArtErg),
    opt(ReaktionArt),
    req(Zeit),
];

const STAFFELPERSON: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WkArtErg),
    req(Zk),
    req(Zahl),
    req(Zahl),
    req(GeschlechtPf),
    req(Zahl),
    opt(Zahl),
    opt(Land),
    opt(Land),
    opt(Land),
];

const STZWISCHENZEIT: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    req(Zahl),
    req(Zeit),
];

const STABLOESE: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    opt(ReaktionArt),
    req(Zeit),
];

const ERG_PNERGEBNIS: &[AttrSpec] = &[
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    req(Zahl),
    opt(Zk),
    req(Zk),
    req(Zahl),
    req(Zahl),
    req(GeschlechtPf),
    req(Zahl),
    opt(Zahl),
    req(Zk),
    req(Zahl),
    req(Zeit),
    opt(Zk),
    opt(NachtragFlag),
    opt(Land),
    opt(Land),
    opt(Land),
];

const ERG_STAFFELERGEBNIS: &[AttrSpec] = &[
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    req(Zahl),
    opt(Zk),
    req(Zahl),
    req(Zahl),
    req(Zk),
    req(Zahl),
    req(Zeit),
    opt(Zahl),
    opt(Zk),
    opt(NachtragFlag),
];

const ERG: &[Entry] = &[
    ("ERZEUGER", ERZEUGER),
    ("VERANSTALTUNG", VERANSTALTUNG),
    ("VERANSTALTER", VERANSTALTER),
    ("AUSRICHTER", AUSRICHTER),
    ("ABSCHNITT", ABSCHNITT),
    ("KAMPFGERICHT", KAMPFGERICHT),
    ("WETTKAMPF", ERG_WETTKAMPF),
    ("WERTUNG", WERTUNG),
    ("VEREIN", VEREIN),
    ("PNERGEBNIS", ERG_PNERGEBNIS),
    ("PNZWISCHENZEIT", PNZWISCHENZEIT),
    ("PNREAKTION", PNREAKTION),
    ("STAFFELERGEBNIS", ERG_STAFFELERGEBNIS),
    ("STERGEBNIS", ERG_STAFFELERGEBNIS),
    ("STAFFELPERSON", STAFFELPERSON),
    ("STZWISCHENZEIT", STZWISCHENZEIT),
    ("STABLOESE", STABLOESE),
];

const VRL_PERSON: &[AttrSpec] = &[
    req(Zk),
    req(Zahl),
    req(Zahl),
    req(GeschlechtPf),
    req(Zahl),
    opt(Zahl),
    opt(Land),
    opt(Land),
    opt(Land),
];

const VRL_PERSONENERGEBNIS: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    req(Zahl),
    req(Zeit),
    opt(NichtwertungGrund),
    opt(Zk),
    opt(NachtragFlag),
];

const VRL_STAFFEL: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WertTyp),
    req(JgAk),
    opt(JgAk),
];

const VRL_STAFFELERGEBNIS: &[AttrSpec] = &[
    req(Zahl),
    req(Zahl),
    req(WkArtErg),
    req(Zahl),
    req(Zahl),
    req(Zeit),
    opt(Zk),
    opt(Zahl),
    opt(Zk),
    opt(NachtragFlag),
];

const VRL: &[Entry] = &[
    ("ERZEUGER", ERZEUGER),
    ("VERANSTALTUNG", VERANSTALTUNG),
    ("VERANSTALTER", VERANSTALTER),
    ("AUSRICHTER", AUSRICHTER),
    ("ABSCHNITT", ABSCHNITT),
    ("KAMPFGERICHT", KAMPFGERICHT),
    ("WETTKAMPF", ERG_WETTKAMPF),
    ("WERTUNG", WERTUNG),
    ("VEREIN", VEREIN),
    ("PERSON", VRL_PERSON),
    ("PERSONENERGEBNIS", VRL_PERSONENERGEBNIS),
    ("PNZWISCHENZEIT", PNZWISCHENZEIT),
    ("PNREAKTION", PNREAKTION),
    ("STAFFEL", VRL_STAFFEL),
    ("STAFFELPERSON", STAFFELPERSON),
    ("STAFFELERGEBNIS", VRL_STAFFELERGEBNIS),
    ("STERGEBNIS", VRL_STAFFELERGEBNIS),
    ("STZWISCHENZEIT", STZWISCHENZEIT),
    ("STABLOESE", STABLOESE),
];

pub(crate) fn build(list_type: ListType) -> SchemaTable {
    match list_type {
        ListType::Wettkampfdefinitionsliste => {
            SchemaTable::new(list_type, WKDL, Some(wkdl_cross_rule))
        }
        ListType::Vereinsmeldeliste => SchemaTable::new(list_type, VML, None),
        ListType::Wettkampfergebnisliste => SchemaTable::new(list_type, ERG, None),
        ListType::Vereinsergebnisliste => SchemaTable::new(list_type, VRL, None),
    }
}
