use chrono::NaiveDate;
use makehistory_core::glyph::supported_symbols;
use makehistory_core::{
    image_names, lookup, map_to_plan, named_image, CalendarAnchor, CellPosition, GridCell,
    IntensityMatrix, PaintingRequest, PaintingScheduler, ProgressRecord, GRID_COLUMNS, GRID_ROWS,
};
use serde_json::json;
use std::num::NonZeroU32;

fn per_unit(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap()
}

#[test]
fn every_glyph_plans_one_cell_per_lit_pixel() {
    for symbol in supported_symbols() {
        let matrix = lookup(symbol).unwrap();
        let plan = map_to_plan(&matrix, per_unit(1));
        assert_eq!(plan.len(), matrix.non_zero_cells(), "symbol {symbol:?}");
        assert!(plan.iter().all(|cell| cell.target_count == 1));
    }
}

#[test]
fn built_in_images_scale_with_intensity() {
    for name in image_names() {
        let matrix = named_image(name).unwrap();
        assert_eq!(matrix.columns(), GRID_COLUMNS);

        let plan = map_to_plan(&matrix, per_unit(4));
        for cell in &plan {
            let value = matrix.get(cell.position.row, cell.position.column).unwrap();
            assert_eq!(cell.target_count, u32::from(value) * 4, "image {name}");
        }
    }
}

#[test]
fn blank_matrix_plans_nothing_and_requests_nothing() {
    let blank = IntensityMatrix::from_art(&["   "; GRID_ROWS]).unwrap();
    let plan = map_to_plan(&blank, per_unit(30));
    assert!(plan.is_empty());

    let anchor = CalendarAnchor::new(NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()).unwrap();
    let scheduler = PaintingScheduler::new(anchor, "paint: ");
    assert!(scheduler.reconcile(&plan, &ProgressRecord::new()).is_empty());

    let zero_target = [GridCell {
        position: CellPosition::new(0, 0).unwrap(),
        target_count: 0,
    }];
    assert!(scheduler
        .reconcile(&zero_target, &ProgressRecord::new())
        .is_empty());
}

#[test]
fn every_grid_cell_survives_a_date_round_trip() {
    let anchor = CalendarAnchor::for_today(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            let position = CellPosition::new(row, column).unwrap();
            assert_eq!(anchor.position_for(anchor.date_for(position)), Some(position));
        }
    }
}

#[test]
fn plan_and_requests_serialize_as_plain_json() {
    let cell = GridCell {
        position: CellPosition::new(2, 7).unwrap(),
        target_count: 3,
    };
    assert_eq!(
        serde_json::to_value(cell).unwrap(),
        json!({ "position": { "row": 2, "column": 7 }, "target_count": 3 })
    );

    let request = PaintingRequest {
        position: CellPosition::new(0, 1).unwrap(),
        date: NaiveDate::from_ymd_opt(2025, 11, 9).unwrap(),
        message: "paint: cell(0,1)".to_string(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["date"], "2025-11-09");
    assert_eq!(value["message"], "paint: cell(0,1)");

    let back: PaintingRequest = serde_json::from_value(value).unwrap();
    assert_eq!(back, request);
}

#[test]
fn matrix_deserialization_enforces_shape() {
    let matrix: IntensityMatrix =
        serde_json::from_value(json!([[1], [0], [0], [0], [0], [0], [9]])).unwrap();
    assert_eq!(matrix.non_zero_cells(), 2);

    assert!(serde_json::from_value::<IntensityMatrix>(json!([[1], [0]])).is_err());
    assert!(
        serde_json::from_value::<IntensityMatrix>(json!([[10], [0], [0], [0], [0], [0], [0]]))
            .is_err()
    );
}
