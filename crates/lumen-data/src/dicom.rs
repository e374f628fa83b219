//! Minimal DICOM attribute model: tags, value representations and
//! datasets. Carries only what the session format round-trips; semantic
//! DICOM (modules, IODs, conformance) is out of scope.

use std::collections::BTreeMap;
use std::fmt;

/// A DICOM attribute tag, `(group, element)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag {
    pub group: u16,
    pub element: u16,
}

impl Tag {
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04x},{:04x})", self.group, self.element)
    }
}

/// Explicit value representations. Long forms carry a 32-bit length on
/// the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vr {
    Ae,
    As,
    At,
    Cs,
    Da,
    Ds,
    Dt,
    Fd,
    Fl,
    Is,
    Lo,
    Lt,
    Ob,
    Of,
    Ow,
    Pn,
    Sh,
    Sl,
    Sq,
    Ss,
    St,
    Tm,
    Ui,
    Ul,
    Un,
    Us,
    Ut,
}

impl Vr {
    pub fn code(self) -> [u8; 2] {
        match self {
            Self::Ae => *b"AE",
            Self::As => *b"AS",
            Self::At => *b"AT",
            Self::Cs => *b"CS",
            Self::Da => *b"DA",
            Self::Ds => *b"DS",
            Self::Dt => *b"DT",
            Self::Fd => *b"FD",
            Self::Fl => *b"FL",
            Self::Is => *b"IS",
            Self::Lo => *b"LO",
            Self::Lt => *b"LT",
            Self::Ob => *b"OB",
            Self::Of => *b"OF",
            Self::Ow => *b"OW",
            Self::Pn => *b"PN",
            Self::Sh => *b"SH",
            Self::Sl => *b"SL",
            Self::Sq => *b"SQ",
            Self::Ss => *b"SS",
            Self::St => *b"ST",
            Self::Tm => *b"TM",
            Self::Ui => *b"UI",
            Self::Ul => *b"UL",
            Self::Un => *b"UN",
            Self::Us => *b"US",
            Self::Ut => *b"UT",
        }
    }

    pub fn from_code(code: [u8; 2]) -> Option<Self> {
        match &code {
            b"AE" => Some(Self::Ae),
            b"AS" => Some(Self::As),
            b"AT" => Some(Self::At),
            b"CS" => Some(Self::Cs),
            b"DA" => Some(Self::Da),
            b"DS" => Some(Self::Ds),
            b"DT" => Some(Self::Dt),
            b"FD" => Some(Self::Fd),
            b"FL" => Some(Self::Fl),
            b"IS" => Some(Self::Is),
            b"LO" => Some(Self::Lo),
            b"LT" => Some(Self::Lt),
            b"OB" => Some(Self::Ob),
            b"OF" => Some(Self::Of),
            b"OW" => Some(Self::Ow),
            b"PN" => Some(Self::Pn),
            b"SH" => Some(Self::Sh),
            b"SL" => Some(Self::Sl),
            b"SQ" => Some(Self::Sq),
            b"SS" => Some(Self::Ss),
            b"ST" => Some(Self::St),
            b"TM" => Some(Self::Tm),
            b"UI" => Some(Self::Ui),
            b"UL" => Some(Self::Ul),
            b"UN" => Some(Self::Un),
            b"US" => Some(Self::Us),
            b"UT" => Some(Self::Ut),
            _ => None,
        }
    }

    /// Whether the wire encoding uses the 32-bit length form.
    pub fn is_long(self) -> bool {
        matches!(self, Self::Ob | Self::Of | Self::Ow | Self::Sq | Self::Un | Self::Ut)
    }

    /// Byte used to pad odd-length values to even length.
    pub fn padding(self) -> u8 {
        match self {
            Self::Ae
            | Self::As
            | Self::Cs
            | Self::Da
            | Self::Ds
            | Self::Dt
            | Self::Is
            | Self::Lo
            | Self::Lt
            | Self::Pn
            | Self::Sh
            | Self::St
            | Self::Tm
            | Self::Ut => b' ',
            _ => 0,
        }
    }
}

/// One attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub vr: Vr,
    pub value: Vec<u8>,
}

impl Element {
    pub fn new(vr: Vr, value: Vec<u8>) -> Self {
        Self { vr, value }
    }
}

/// An attribute set ordered by tag, as the wire format requires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    elements: BTreeMap<Tag, Element>,
}

impl Dataset {
    pub fn set(&mut self, tag: Tag, element: Element) {
        self.elements.insert(tag, element);
    }

    pub fn get(&self, tag: Tag) -> Option<&Element> {
        self.elements.get(&tag)
    }

    /// Stores a textual value. Padding is applied by the wire encoder,
    /// not here.
    pub fn set_string(&mut self, tag: Tag, vr: Vr, value: &str) {
        self.set(tag, Element::new(vr, value.as_bytes().to_vec()));
    }

    /// Reads a textual value, stripping trailing padding.
    pub fn string(&self, tag: Tag) -> Option<String> {
        self.get(tag).map(|element| {
            String::from_utf8_lossy(&element.value)
                .trim_end_matches(['\0', ' '])
                .to_string()
        })
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, Tag, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Tags of the attributes the series types expose typed accessors for.
pub mod tags {
    use super::Tag;

    pub const SOP_CLASS_UID: Tag = Tag::new(0x0008, 0x0016);
    pub const SOP_INSTANCE_UID: Tag = Tag::new(0x0008, 0x0018);
    pub const STUDY_DATE: Tag = Tag::new(0x0008, 0x0020);
    pub const SERIES_DATE: Tag = Tag::new(0x0008, 0x0021);
    pub const STUDY_TIME: Tag = Tag::new(0x0008, 0x0030);
    pub const SERIES_TIME: Tag = Tag::new(0x0008, 0x0031);
    pub const MODALITY: Tag = Tag::new(0x0008, 0x0060);
    pub const INSTITUTION_NAME: Tag = Tag::new(0x0008, 0x0080);
    pub const REFERRING_PHYSICIAN_NAME: Tag = Tag::new(0x0008, 0x0090);
    pub const STUDY_DESCRIPTION: Tag = Tag::new(0x0008, 0x1030);
    pub const SERIES_DESCRIPTION: Tag = Tag::new(0x0008, 0x103E);
    pub const PERFORMING_PHYSICIAN_NAME: Tag = Tag::new(0x0008, 0x1050);
    pub const PATIENT_NAME: Tag = Tag::new(0x0010, 0x0010);
    pub const PATIENT_ID: Tag = Tag::new(0x0010, 0x0020);
    pub const PATIENT_BIRTH_DATE: Tag = Tag::new(0x0010, 0x0030);
    pub const PATIENT_SEX: Tag = Tag::new(0x0010, 0x0040);
    pub const BODY_PART_EXAMINED: Tag = Tag::new(0x0018, 0x0015);
    pub const CONTRAST_BOLUS_AGENT: Tag = Tag::new(0x0018, 0x0010);
    pub const PROTOCOL_NAME: Tag = Tag::new(0x0018, 0x1030);
    pub const PATIENT_POSITION: Tag = Tag::new(0x0018, 0x5100);
    pub const STUDY_INSTANCE_UID: Tag = Tag::new(0x0020, 0x000D);
    pub const SERIES_INSTANCE_UID: Tag = Tag::new(0x0020, 0x000E);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_access_strips_padding() {
        let mut dataset = Dataset::default();
        dataset.set(
            tags::PATIENT_NAME,
            Element::new(Vr::Pn, b"Doe^John ".to_vec()),
        );
        assert_eq!(dataset.string(tags::PATIENT_NAME).unwrap(), "Doe^John");
    }

    #[test]
    fn elements_iterate_in_tag_order() {
        let mut dataset = Dataset::default();
        dataset.set_string(tags::SERIES_INSTANCE_UID, Vr::Ui, "1.2.3");
        dataset.set_string(tags::PATIENT_NAME, Vr::Pn, "A");
        dataset.set_string(tags::MODALITY, Vr::Cs, "CT");
        let order: Vec<Tag> = dataset.iter().map(|(tag, _)| *tag).collect();
        assert_eq!(
            order,
            [tags::MODALITY, tags::PATIENT_NAME, tags::SERIES_INSTANCE_UID]
        );
    }

    #[test]
    fn vr_codes_round_trip() {
        for vr in [Vr::Ae, Vr::Ob, Vr::Pn, Vr::Sq, Vr::Ut, Vr::Us] {
            assert_eq!(Vr::from_code(vr.code()), Some(vr));
        }
        assert_eq!(Vr::from_code(*b"ZZ"), None);
    }
}
