use crate::domain::model::{MarkRecord, Neighbor};
use std::collections::HashMap;

/// Rounds to three decimals on the exact binary value, so 1.0005 (stored as
/// 1.000499…) becomes 1.0.
pub(crate) fn round3(value: f64) -> f64 {
    format!("{:.3}", value).parse().unwrap_or(value)
}

/// Direction from `(dx, dy)` in degrees, counter-clockwise from +X, in `[0, 360)`.
pub fn bearing_deg(dx: f64, dy: f64) -> f64 {
    let angle = round3((dy.atan2(dx).to_degrees() + 360.0) % 360.0);
    if angle >= 360.0 {
        0.0
    } else {
        angle
    }
}

fn nearest_in_layer(records: &[MarkRecord], members: &[usize], index: usize) -> Option<Neighbor> {
    let origin = &records[index];
    let mut best: Option<(usize, f64)> = None;

    for &other in members {
        if other == index {
            continue;
        }
        let candidate = &records[other];
        let distance =
            (candidate.center_x - origin.center_x).hypot(candidate.center_y - origin.center_y);
        // 嚴格小於：距離相同時保留先出現者，NaN 永遠不會勝出
        if distance < best.map_or(f64::INFINITY, |(_, d)| d) {
            best = Some((other, distance));
        }
    }

    best.map(|(other, distance)| {
        let neighbor = &records[other];
        Neighbor {
            name: neighbor.mark.clone(),
            distance: round3(distance),
            angle_deg: bearing_deg(
                neighbor.center_x - origin.center_x,
                neighbor.center_y - origin.center_y,
            ),
        }
    })
}

/// Attaches each record's nearest same-layer neighbour, then orders the
/// records by layer, center X, center Y and numbers them from 1.
///
/// Neighbours are resolved in input order, so among equidistant candidates
/// the one that appeared first in the content file wins.
pub fn add_nearest_same_layer(mut records: Vec<MarkRecord>) -> Vec<MarkRecord> {
    let nearest: Vec<Option<Neighbor>> = {
        let mut by_layer: HashMap<&str, Vec<usize>> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            by_layer.entry(record.layer.as_str()).or_default().push(index);
        }

        (0..records.len())
            .map(|index| {
                let members = by_layer
                    .get(records[index].layer.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                nearest_in_layer(&records, members, index)
            })
            .collect()
    };

    for (record, neighbor) in records.iter_mut().zip(nearest) {
        record.nearest = neighbor;
    }

    records.sort_by(|a, b| {
        a.layer
            .cmp(&b.layer)
            .then(a.center_x.total_cmp(&b.center_x))
            .then(a.center_y.total_cmp(&b.center_y))
    });
    for (seq, record) in records.iter_mut().enumerate() {
        record.seq = seq + 1;
    }

    records
}
