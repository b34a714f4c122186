use lineup_core::board::{BoardGeometry, BoardLayout};
use lineup_core::catalog::{
    AttackType, Catalog, CatalogWarning, PieceRecord, Quality, SynergyRecord, TagFilter,
    UtilityType, sort_for_display,
};
use lineup_core::planner::Planner;
use lineup_core::state::{Board, MAX_PIECES};
use lineup_core::synergy::{AutoFillError, evaluate, missing_members, plan_auto_fill};

fn record(name: &str) -> PieceRecord {
    PieceRecord {
        name: name.to_string(),
        quality: Quality::Blue,
        skill: String::new(),
        attack: None,
        range: None,
        utility: None,
    }
}

fn synergy(id: &str, required: usize, members: &[&str]) -> SynergyRecord {
    SynergyRecord {
        id: id.to_string(),
        name: format!("{id} bond"),
        description: String::new(),
        required_count: required,
        pieces: members.iter().map(|member| member.to_string()).collect(),
    }
}

fn fixture_catalog() -> Catalog {
    let mut pieces = Vec::new();
    for name in ["a1", "a2", "a3"] {
        pieces.push(record(name));
    }
    for n in 1..=6 {
        pieces.push(record(&format!("b{n}")));
    }
    for n in 1..=5 {
        pieces.push(record(&format!("c{n}")));
    }
    pieces.push(record("x1"));
    pieces.push(record("x2"));
    for n in 1..=17 {
        pieces.push(record(&format!("f{n}")));
    }
    let synergies = vec![
        synergy("A", 2, &["a1", "a2", "a3"]),
        synergy("B", 6, &["b1", "b2", "b3", "b4", "b5", "b6"]),
        synergy("C", 3, &["c1", "c2", "c3", "c4", "c5"]),
        synergy("D", 2, &["x1", "x2"]),
    ];
    Catalog::new(pieces, synergies)
}

fn place_names(board: &mut Board, catalog: &Catalog, names: &[&str]) {
    let empty = board.empty_placeable_slots();
    for (name, slot) in names.iter().zip(empty) {
        let piece = catalog.piece_by_name(name).unwrap().piece_ref();
        board.place(slot, piece).unwrap();
    }
}

fn status_count<'a>(
    statuses: &'a [lineup_core::synergy::SynergyStatus<'a>],
    id: &str,
) -> &'a lineup_core::synergy::SynergyStatus<'a> {
    statuses
        .iter()
        .find(|status| status.synergy.id == id)
        .unwrap()
}

#[test]
fn activation_threshold() {
    let catalog = fixture_catalog();
    let mut board = Board::standard();
    place_names(&mut board, &catalog, &["c1", "c2"]);

    let statuses = evaluate(&catalog, &board.unique_names());
    let c = status_count(&statuses, "C");
    assert_eq!((c.count, c.activated, c.maxed), (2, false, false));

    place_names(&mut board, &catalog, &["c3"]);
    let statuses = evaluate(&catalog, &board.unique_names());
    let c = status_count(&statuses, "C");
    assert_eq!((c.count, c.activated, c.maxed), (3, true, false));
    assert_eq!(status_count(&statuses, "A").count, 0);
    assert_eq!(status_count(&statuses, "B").count, 0);
    assert_eq!(status_count(&statuses, "D").count, 0);
}

#[test]
fn panel_sorts_activated_first_then_count() {
    let catalog = fixture_catalog();
    let mut board = Board::standard();
    place_names(&mut board, &catalog, &["a1", "a2"]);
    place_names(&mut board, &catalog, &["b1", "b2", "b3", "b4", "b5"]);
    place_names(&mut board, &catalog, &["c1", "c2", "c3", "c4"]);

    let statuses = evaluate(&catalog, &board.unique_names());
    let order: Vec<&str> = statuses
        .iter()
        .map(|status| status.synergy.id.as_str())
        .collect();
    assert_eq!(order, ["C", "A", "B", "D"]);
    assert!(statuses[0].activated && statuses[1].activated);
    assert!(!statuses[2].activated && !statuses[3].activated);
}

#[test]
fn duplicate_names_count_once() {
    let catalog = fixture_catalog();
    let mut board = Board::standard();
    let x1 = catalog.piece_by_name("x1").unwrap().piece_ref();
    let empty = board.empty_placeable_slots();
    board.place(empty[0], x1.clone()).unwrap();
    board.place(empty[1], x1).unwrap();

    assert_eq!(board.occupied_count(), 2);
    let statuses = evaluate(&catalog, &board.unique_names());
    assert_eq!(status_count(&statuses, "D").count, 1);
}

#[test]
fn maxed_when_all_members_present() {
    let catalog = fixture_catalog();
    let mut board = Board::standard();
    place_names(&mut board, &catalog, &["a1", "a2", "a3"]);

    let statuses = evaluate(&catalog, &board.unique_names());
    let a = status_count(&statuses, "A");
    assert!(a.activated && a.maxed);
}

#[test]
fn missing_members_in_declared_order() {
    let catalog = fixture_catalog();
    let mut board = Board::standard();
    place_names(&mut board, &catalog, &["c2"]);

    let missing = missing_members(
        &catalog,
        catalog.synergy("C").unwrap(),
        &board.unique_names(),
    );
    assert_eq!(missing, ["c1", "c3", "c4", "c5"]);
}

#[test]
fn auto_fill_completes_synergy() {
    let catalog = fixture_catalog();
    let mut planner = Planner::new(catalog);
    planner.auto_fill("A").unwrap();

    assert_eq!(planner.occupied_count(), 3);
    let statuses = planner.synergy_panel();
    let a = statuses
        .iter()
        .find(|status| status.synergy.id == "A")
        .unwrap();
    assert!(a.activated && a.maxed);

    // Second run has nothing left to add.
    assert_eq!(planner.auto_fill("A").unwrap(), 0);
    assert_eq!(planner.occupied_count(), 3);
}

#[test]
fn auto_fill_rejected_when_cap_would_be_passed() {
    let catalog = fixture_catalog();
    let mut board = Board::standard();
    let fillers: Vec<String> = (1..=17).map(|n| format!("f{n}")).collect();
    let filler_names: Vec<&str> = fillers.iter().map(String::as_str).collect();
    place_names(&mut board, &catalog, &filler_names);
    assert_eq!(board.occupied_count(), 17);

    let err = plan_auto_fill(&board, &catalog, catalog.synergy("D").unwrap()).unwrap_err();
    assert_eq!(err, AutoFillError::PopulationCapExceeded { cap: MAX_PIECES });
    assert_eq!(board.occupied_count(), 17);
}

#[test]
fn auto_fill_rejected_without_enough_slots() {
    let catalog = fixture_catalog();
    let geometry = BoardGeometry {
        main_cols: 3,
        main_placeable_columns: vec![vec![1, 2, 3]],
        triangle_row_widths: Vec::new(),
    };
    let mut board = Board::new(BoardLayout::from_geometry(&geometry));
    place_names(&mut board, &catalog, &["f1", "f2"]);

    let err = plan_auto_fill(&board, &catalog, catalog.synergy("D").unwrap()).unwrap_err();
    assert_eq!(
        err,
        AutoFillError::InsufficientEmptySlots {
            needed: 2,
            available: 1
        }
    );
    assert_eq!(board.occupied_count(), 2);
}

#[test]
fn unknown_member_warns_and_stays_unindexed() {
    let pieces = vec![record("x1")];
    let synergies = vec![synergy("D", 1, &["x1", "ghost"])];
    let catalog = Catalog::new(pieces, synergies);

    assert_eq!(
        catalog.warnings(),
        [CatalogWarning::UnknownPieceReference {
            synergy: "D bond".to_string(),
            piece: "ghost".to_string(),
        }]
    );
    assert!(catalog.piece_by_name("ghost").is_none());
    assert_eq!(catalog.synergies_for("x1"), ["D"]);

    // The ghost still raises the maxed threshold, exactly as declared.
    let mut board = Board::standard();
    place_names(&mut board, &catalog, &["x1"]);
    let statuses = evaluate(&catalog, &board.unique_names());
    let d = status_count(&statuses, "D");
    assert_eq!((d.count, d.activated, d.maxed), (1, true, false));

    // And auto-fill never plans a piece it cannot construct.
    let plan = plan_auto_fill(&board, &catalog, catalog.synergy("D").unwrap()).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn tag_filter_is_conjunctive() {
    let mut pieces = vec![record("plain")];
    pieces.push(PieceRecord {
        attack: Some(AttackType::Internal),
        utility: Some(UtilityType::Control),
        ..record("both")
    });
    pieces.push(PieceRecord {
        attack: Some(AttackType::Internal),
        ..record("attack-only")
    });
    let catalog = Catalog::new(pieces, Vec::new());

    let filter = TagFilter {
        attack: Some(AttackType::Internal),
        utility: Some(UtilityType::Control),
        ..TagFilter::default()
    };
    let matched: Vec<&str> = catalog
        .filter_pieces(&filter)
        .iter()
        .map(|piece| piece.name.as_str())
        .collect();
    assert_eq!(matched, ["both"]);

    assert!(TagFilter::default().is_empty());
    assert_eq!(catalog.filter_pieces(&TagFilter::default()).len(), 3);
}

#[test]
fn display_sort_groups_by_first_synergy() {
    let catalog = fixture_catalog();
    let mut pieces = vec![
        catalog.piece_by_name("f1").unwrap(),
        catalog.piece_by_name("c2").unwrap(),
        catalog.piece_by_name("b1").unwrap(),
        catalog.piece_by_name("c1").unwrap(),
    ];
    sort_for_display(&mut pieces);
    let names: Vec<&str> = pieces.iter().map(|piece| piece.name.as_str()).collect();
    // Synergy id order first, name within, synergy-less pieces last.
    assert_eq!(names, ["b1", "c1", "c2", "f1"]);
}
