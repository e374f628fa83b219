//! Series types: DICOM-attributed acquisitions and their aggregates.

use std::collections::{BTreeMap, BTreeSet};

use crate::dicom::{Dataset, Tag, Vr, tags};
use crate::image::Image;
use crate::object::Object;
use crate::reconstruction::Reconstruction;
use crate::shared::Shared;

macro_rules! string_attribute {
    ($($getter:ident / $setter:ident => $tag:expr, $vr:expr;)+) => {
        $(
            pub fn $getter(&self) -> Option<String> {
                self.string($tag)
            }

            pub fn $setter(&mut self, value: &str) {
                self.set_string($tag, $vr, value);
            }
        )+
    };
}

/// A generic acquisition: one DICOM dataset per instance. Attribute
/// accessors read and write the first instance, which is created on
/// demand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    pub datasets: Vec<Dataset>,
}

impl Series {
    pub fn num_instances(&self) -> usize {
        self.datasets.len()
    }

    fn primary(&mut self) -> &mut Dataset {
        if self.datasets.is_empty() {
            self.datasets.push(Dataset::default());
        }
        &mut self.datasets[0]
    }

    pub fn string(&self, tag: Tag) -> Option<String> {
        self.datasets.first().and_then(|dataset| dataset.string(tag))
    }

    pub fn set_string(&mut self, tag: Tag, vr: Vr, value: &str) {
        self.primary().set_string(tag, vr, value);
    }

    string_attribute! {
        patient_name / set_patient_name => tags::PATIENT_NAME, Vr::Pn;
        patient_id / set_patient_id => tags::PATIENT_ID, Vr::Lo;
        patient_birth_date / set_patient_birth_date => tags::PATIENT_BIRTH_DATE, Vr::Da;
        patient_sex / set_patient_sex => tags::PATIENT_SEX, Vr::Cs;
        study_instance_uid / set_study_instance_uid => tags::STUDY_INSTANCE_UID, Vr::Ui;
        study_date / set_study_date => tags::STUDY_DATE, Vr::Da;
        study_time / set_study_time => tags::STUDY_TIME, Vr::Tm;
        study_description / set_study_description => tags::STUDY_DESCRIPTION, Vr::Lo;
        series_instance_uid / set_series_instance_uid => tags::SERIES_INSTANCE_UID, Vr::Ui;
        series_date / set_series_date => tags::SERIES_DATE, Vr::Da;
        series_time / set_series_time => tags::SERIES_TIME, Vr::Tm;
        series_description / set_series_description => tags::SERIES_DESCRIPTION, Vr::Lo;
        modality / set_modality => tags::MODALITY, Vr::Cs;
        institution_name / set_institution_name => tags::INSTITUTION_NAME, Vr::Lo;
        referring_physician_name / set_referring_physician_name => tags::REFERRING_PHYSICIAN_NAME, Vr::Pn;
        performing_physician_name / set_performing_physician_name => tags::PERFORMING_PHYSICIAN_NAME, Vr::Pn;
        protocol_name / set_protocol_name => tags::PROTOCOL_NAME, Vr::Lo;
        body_part_examined / set_body_part_examined => tags::BODY_PART_EXAMINED, Vr::Cs;
        patient_position / set_patient_position => tags::PATIENT_POSITION, Vr::Cs;
        contrast_bolus_agent / set_contrast_bolus_agent => tags::CONTRAST_BOLUS_AGENT, Vr::Lo;
    }
}

/// A series whose source instances survive only as filtered byte blobs.
///
/// The blobs are not reconstructible DICOM files; the representation is
/// knowingly lossy and preserved as such for file compatibility.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DicomSeries {
    pub series: Series,
    pub sop_class_uids: BTreeSet<String>,
    pub computed_tag_values: BTreeMap<String, String>,
    /// Raw per-instance payloads keyed by instance number.
    pub instances: BTreeMap<u32, Vec<u8>>,
}

/// An acquisition that is also a voxel image.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageSeries {
    pub series: Series,
    pub image: Image,
    pub dicom_reference: Option<Shared<DicomSeries>>,
}

/// An acquisition carrying segmented organ reconstructions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelSeries {
    pub series: Series,
    pub reconstruction_db: Vec<Shared<Reconstruction>>,
    pub dicom_reference: Option<Shared<DicomSeries>>,
}

/// An ordered collection of series of any concrete kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<Object>,
}

impl SeriesSet {
    pub fn push(&mut self, series: Object) {
        self.series.push(series);
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_create_the_first_instance_on_demand() {
        let mut series = Series::default();
        assert_eq!(series.num_instances(), 0);
        series.set_patient_name("Doe^Jane");
        assert_eq!(series.num_instances(), 1);
        assert_eq!(series.patient_name().unwrap(), "Doe^Jane");
        assert_eq!(series.modality(), None);
    }
}
