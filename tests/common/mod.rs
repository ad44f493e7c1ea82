//! Shared fixtures for pipeline tests
//!
//! Writes small entity CSVs shaped like the real exports into a temp
//! directory, so tests can drive the merge and adaptation stages end to end.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write one CSV file under `dir` and return its path.
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture CSV");
    path
}

/// A minimal case-study export: all eight entity tables, one row each,
/// with every foreign-key column populated so each of the thirteen
/// relationship types derives exactly one edge.
pub fn case_study_dir() -> TempDir {
    let dir = TempDir::new().expect("failed to create fixture dir");
    let p = dir.path();
    write_csv(
        p,
        "CaseStudy.csv",
        "_id,_labels,CaseStudyName,CaseStudyDescription,related_organ,related_chemical,\
         related_model_system,related_computational_model,related_endpoint\n\
         CS1,:CaseStudy,Liver toxicity,A liver case study,O1,CH1,MS1,CM1,ME1\n",
    );
    write_csv(p, "Organ.csv", "_id,_labels,OrganName\nO1,:Organ,Liver\n");
    write_csv(
        p,
        "Chemical.csv",
        "_id,_labels,ChemicalName,ChemicalCAS,SMILES,InChIKey,chemical_group,\
         measured_with_bioassay,relevant_computational_model,measured_in_model_system\n\
         CH1,:Chemical,Valproic acid,99-66-1,CCCC(CCC)C(=O)O,NIJJYAXOARWZEE-UHFFFAOYSA-N,\
         fatty acid,BA1,CM1,MS1\n",
    );
    write_csv(
        p,
        "Model_system.csv",
        "_id,_labels,ModelSystemName,ModelSystemCellType,ModelSystemDescription,relevant_organ\n\
         MS1,:Model_system,HepG2 spheroid,HepG2,3D liver spheroids,O1\n",
    );
    write_csv(
        p,
        "Computational_model.csv",
        "_id,_labels,ComputationalModelName,ComputationalModelType,ComputationalModelLanguage,\
         ComputationalModelInput,ComputationalModelOutput,relevant_organ\n\
         CM1,:Computational_model,PBK liver model,PBK,R,dose,tissue concentration,O1\n",
    );
    write_csv(
        p,
        "Bioassay.csv",
        "_id,_labels,BioassayName,Measured,related_model_system,related_organ,\
         used_with_experimental_condition\n\
         BA1,:Bioassay,MTT assay,viability,MS1,O1,EC1\n",
    );
    write_csv(
        p,
        "ExperimentalCondition.csv",
        "_id,_labels,condition_name,exposure_duration,exposure_concentration,\
         ExperimentalConditionDescription\n\
         EC1,:Experimental_condition,acute exposure,24h,10uM,Single dose for 24 hours\n",
    );
    write_csv(
        p,
        "MeasurableEndpoint.csv",
        "_id,_labels,MeasurableEndpointName,MeasurableEndpointDescription,MeasurableEndpointType\n\
         ME1,:Measurable_endpoint,Cell viability,Fraction of viable cells,in vitro\n",
    );
    dir
}

/// Raw AOP-Wiki style exports: two AOP rows whose relationships still sit in
/// foreign-key columns, plus a key-event companion table. Each of the four
/// derivation rules fires exactly once across the two rows.
pub fn aop_dir() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("failed to create fixture dir");
    let aop = write_csv(
        dir.path(),
        "aops.csv",
        "AOPID,AOPName,AOPcreator,AOPDescription,AOPsource,MIE,AO,AOPKE,AOPStressor\n\
         A1,Oxidative stress leading to fibrosis,Jane,An adverse outcome pathway,aopwiki,M1,,K1,\n\
         A2,Receptor binding leading to apoptosis,Joe,Another pathway,aopwiki,,AO2,,S1\n",
    );
    let key_events = write_csv(
        dir.path(),
        "key_events.csv",
        "KEID,KEName,KEDescription\n\
         K1,Increased oxidative stress,Reactive oxygen species accumulate\n",
    );
    (dir, aop, key_events)
}
