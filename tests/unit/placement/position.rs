use super::*;
use crate::foundation::color::Color;

fn pair(base: u32, wm: u32) -> (Raster, Raster) {
    (
        Raster::solid(base, base, Color::rgb(0, 0, 0)),
        Raster::solid(wm, wm, Color::rgb(255, 255, 255)),
    )
}

#[test]
fn method_parse_is_case_insensitive() {
    assert_eq!("single".parse::<PositionMethod>().unwrap(), PositionMethod::Single);
    assert_eq!("GRID".parse::<PositionMethod>().unwrap(), PositionMethod::Grid);
    assert_eq!("Single".parse::<PositionMethod>().unwrap(), PositionMethod::Single);
}

#[test]
fn unknown_method_fails() {
    let (base, wm) = pair(10, 2);
    for method in ["", "tile", "singles", " grid"] {
        assert!(
            matches!(
                resolve(method, &base, &wm, Some("0 0")),
                Err(WatermarkError::InvalidPositionMethod)
            ),
            "{method:?}"
        );
    }
}

#[test]
fn grid_needs_no_position() {
    let (base, wm) = pair(10, 2);
    assert_eq!(resolve("grid", &base, &wm, None).unwrap(), PositionMode::Grid);
    assert_eq!(
        resolve("grid", &base, &wm, Some("not a position")).unwrap(),
        PositionMode::Grid
    );
}

#[test]
fn single_bounds_for_300_by_100() {
    let (base, wm) = pair(300, 100);
    assert_eq!(placement_bounds(&base, &wm).unwrap(), (200, 200));
    assert_eq!(
        resolve("single", &base, &wm, Some("200 0")).unwrap(),
        PositionMode::Single { x: 200, y: 0 }
    );
    assert_eq!(
        resolve("single", &base, &wm, Some("0 200")).unwrap(),
        PositionMode::Single { x: 0, y: 200 }
    );
    assert!(matches!(
        resolve("single", &base, &wm, Some("201 0")),
        Err(WatermarkError::PositionOutOfRange)
    ));
    assert!(matches!(
        resolve("single", &base, &wm, Some("0 201")),
        Err(WatermarkError::PositionOutOfRange)
    ));
}

#[test]
fn single_without_position_is_a_format_error() {
    let (base, wm) = pair(10, 2);
    assert!(matches!(
        resolve("single", &base, &wm, None),
        Err(WatermarkError::InvalidPositionFormat)
    ));
    assert!(matches!(
        resolve("single", &base, &wm, Some("3")),
        Err(WatermarkError::InvalidPositionFormat)
    ));
}

#[test]
fn equal_sizes_allow_only_origin() {
    let (base, wm) = pair(5, 5);
    assert_eq!(
        resolve("single", &base, &wm, Some("0 0")).unwrap(),
        PositionMode::Single { x: 0, y: 0 }
    );
    assert!(matches!(
        resolve("single", &base, &wm, Some("1 0")),
        Err(WatermarkError::PositionOutOfRange)
    ));
}

#[test]
fn bounds_reject_oversized_watermark() {
    let (base, wm) = pair(2, 3);
    assert!(matches!(
        placement_bounds(&base, &wm),
        Err(WatermarkError::OversizedWatermark)
    ));
}
