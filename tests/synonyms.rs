use std::{fs, path::Path};

use dance_partner::{
    data::{
        omes::{Molecule, OmeSource, OmeTable, OmesDir, StopWords},
        synonyms::{MappedSynonym, SynonymIndex},
    },
    error::VocabularyError,
};
use tempfile::TempDir;

const PROTEOME: &str = "UP0000_proteome.txt";

fn write_omes(dir: &Path) {
    fs::write(
        dir.join("LipidMaps_Lipidome.csv"),
        "LMID,Synonyms,Category\n\
         LMFA01,\"Palmitic acid; hexadecanoic acid; shared\",Fatty Acyls\n\
         LMGP02,PC(16:0/18:1); nan,Glycerophospholipids\n",
    )
    .unwrap();
    fs::write(
        dir.join("CHEBI_Metabolome.txt"),
        "CHEBI_ID\tSynonyms\n\
         CHEBI:17234\tGlucose; D-Glucose; shared\n\
         CHEBI:15377\tWater; H2O; the\n",
    )
    .unwrap();
    fs::write(
        dir.join(PROTEOME),
        "UniProtID\tSynonyms\n\
         P01375\tTumor necrosis factor; TNF; shared\n\
         P05231\tInterleukin-6; IL6\n",
    )
    .unwrap();
    fs::write(dir.join("stop_words_english.txt"), "stopwords\nthe\nwater\n").unwrap();
}

fn load_index(dir: &TempDir) -> SynonymIndex {
    write_omes(dir.path());
    SynonymIndex::load(&OmesDir::new(dir.path(), PROTEOME)).unwrap()
}

#[test]
fn lipid_shadows_metabolite_and_gene_product() {
    let dir = TempDir::new().unwrap();
    let index = load_index(&dir);
    let table = index.map_synonyms(&["Shared"], false);
    assert_eq!(
        table,
        vec![MappedSynonym {
            synonym: "shared".into(),
            id: Some("LMFA01".into()),
            molecule: Some(Molecule::Lipid),
        }]
    );
}

#[test]
fn rows_without_identifier_do_not_shadow_lower_sources() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("LipidMaps_Lipidome.csv"),
        "LMID,Synonyms\n,glucose\n  ,Palmitic acid\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("CHEBI_Metabolome.txt"),
        "CHEBI_ID\tSynonyms\nCHEBI:1\tglucose\n",
    )
    .unwrap();
    fs::write(dir.path().join(PROTEOME), "Entry\tSynonyms\n\tTNF\n").unwrap();
    let index = SynonymIndex::load(&OmesDir::new(dir.path(), PROTEOME)).unwrap();

    assert_eq!(
        index.map_synonyms(&["glucose", "palmitic acid", "tnf"], false),
        vec![MappedSynonym {
            synonym: "glucose".into(),
            id: Some("CHEBI:1".into()),
            molecule: Some(Molecule::Metabolite),
        }]
    );
    assert!(index.records().all(|record| !record.id.trim().is_empty()));
}

#[test]
fn map_synonyms_sorts_matches_and_appends_missing_in_input_order() {
    let dir = TempDir::new().unwrap();
    let index = load_index(&dir);
    let terms = ["TNF", "zebra", "glucose", "Unknown-X", "zebra", "!!"];

    let table = index.map_synonyms(&terms, true);
    let synonyms: Vec<_> = table.iter().map(|row| row.synonym.as_str()).collect();
    assert_eq!(synonyms, vec!["glucose", "tnf", "zebra", "unknownx"]);
    assert_eq!(table[0].molecule, Some(Molecule::Metabolite));
    assert_eq!(table[1].id.as_deref(), Some("P01375"));
    assert_eq!(table[1].molecule, Some(Molecule::GeneProduct));
    assert!(table[2].id.is_none() && table[2].molecule.is_none());

    let matched_only = index.map_synonyms(&terms, false);
    assert_eq!(matched_only.len(), 2);
}

#[test]
fn list_synonyms_filters_stop_words_and_short_terms() {
    let dir = TempDir::new().unwrap();
    let index = load_index(&dir);
    let stop_words = StopWords::load(
        dir.path().join("stop_words_english.txt"),
        &["Glucose".to_string()],
    )
    .unwrap();

    let terms = index.list_synonyms(&stop_words, 3);
    assert!(terms.contains(&"palmiticacid".to_string()));
    assert!(terms.contains(&"pc160181".to_string()));
    assert!(terms.contains(&"tnf".to_string()));
    assert!(!terms.contains(&"the".to_string()));
    assert!(!terms.contains(&"water".to_string()));
    assert!(!terms.contains(&"glucose".to_string()));
    assert!(terms.contains(&"h2o".to_string()));
    assert!(!terms.contains(&"nan".to_string()));
    assert_eq!(
        terms.iter().filter(|term| term.as_str() == "shared").count(),
        1
    );

    let long_only = index.list_synonyms(&stop_words, 5);
    assert!(!long_only.contains(&"tnf".to_string()));
    assert!(!long_only.contains(&"il6".to_string()));
}

#[test]
fn building_twice_gives_identical_records() {
    let dir = TempDir::new().unwrap();
    write_omes(dir.path());
    let omes = OmesDir::new(dir.path(), PROTEOME);
    let first: Vec<_> = SynonymIndex::load(&omes).unwrap().records().collect();
    let second: Vec<_> = SynonymIndex::load(&omes).unwrap().records().collect();
    assert_eq!(first, second);
    assert!(first
        .iter()
        .any(|r| r.synonym == "shared" && r.molecule == Molecule::GeneProduct));
}

#[test]
fn missing_synonyms_column_names_the_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "ID\tNames\nX1\tfoo\n").unwrap();
    let err = OmeTable::load(OmeSource::Metabolome, &path).unwrap_err();
    assert!(matches!(
        err,
        VocabularyError::MissingColumn {
            table: "metabolome",
            column: "Synonyms"
        }
    ));
    assert!(err.to_string().contains("metabolome"));
}

#[test]
fn missing_proteome_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_omes(dir.path());
    let err = SynonymIndex::load(&OmesDir::new(dir.path(), "absent.txt")).unwrap_err();
    assert!(matches!(err, VocabularyError::MissingTable { table: "proteome", .. }));
}
