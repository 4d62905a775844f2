use molrl::data::SmilesVocab;

fn vocab() -> SmilesVocab {
    SmilesVocab::from_symbols(&[
        " ", "C", "Cl", "Br", "c", "n", "o", "1", "2", "(", ")", "=", "#", "O", "N",
    ])
    .unwrap()
}

#[test]
fn encoding_is_deterministic() {
    let v = vocab();
    let smiles = vec!["c1ccccc1".to_string(), "CC(=O)N".to_string()];
    let first = v.encode_batch(&smiles).unwrap();
    let second = v.encode_batch(&smiles).unwrap();
    assert_eq!(first, second);
}

#[test]
fn batch_is_padded_to_the_longest_sequence() {
    let v = vocab();
    let batch = v
        .encode_batch(&["CCO".to_string(), "C".to_string()])
        .unwrap();
    assert_eq!(batch.lengths, vec![3, 1]);
    assert_eq!(batch.seq_len(), 3);
    let pad = v.pad_id();
    assert_eq!(batch.ids[1][1], pad);
    assert_eq!(batch.ids[1][2], pad);
}

#[test]
fn two_character_elements_encode_as_one_symbol() {
    let v = vocab();
    let ids = v.tokenize("ClBr").unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(v.symbol(ids[0]), Some("Cl"));
    assert_eq!(v.symbol(ids[1]), Some("Br"));
}

#[test]
fn indices_follow_symbol_order() {
    let v = vocab();
    assert_eq!(v.id(" "), Some(0));
    assert_eq!(v.id("C"), Some(1));
    assert_eq!(v.id("N"), Some(14));
}
