//! Model builders, dispatched by plot kind.

use crate::dataset::DataSubsetData;
use crate::error::{QuarryError, Result};
use crate::stats::{SummaryMetric, SummaryReport};

use super::model::{DataPoint, PlotKind, VisualizationModel};

/// Everything a builder may read.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub title: &'a str,
    pub plot_kind: PlotKind,
    pub data: &'a DataSubsetData,
    pub report: Option<&'a SummaryReport>,
    pub x_column: Option<&'a str>,
    pub y_column: Option<&'a str>,
}

type BuildFn = fn(&BuildContext<'_>) -> Result<VisualizationModel>;

const BUILDERS: [(PlotKind, BuildFn); 5] = [
    (PlotKind::Scatter, build_point_plot),
    (PlotKind::Line, build_point_plot),
    (PlotKind::Bar, build_point_plot),
    (PlotKind::Histogram, build_point_plot),
    (PlotKind::Heatmap, build_heatmap),
];

fn builder_for(kind: PlotKind) -> BuildFn {
    BUILDERS
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, build)| *build)
        .unwrap_or(build_point_plot)
}

/// Build the model for `ctx.plot_kind`.
pub fn build_model(ctx: &BuildContext<'_>) -> Result<VisualizationModel> {
    builder_for(ctx.plot_kind)(ctx)
}

fn build_point_plot(ctx: &BuildContext<'_>) -> Result<VisualizationModel> {
    let (x_name, y_name) = select_axes(ctx)?;
    let data = ctx.data;
    let xs = data.numeric_column(x_name).unwrap_or_default();
    let ys = data.numeric_column(y_name).unwrap_or_default();
    let rows = &data.spec.row_indices;

    let n = xs.len().min(ys.len());
    let points = (0..n)
        .filter_map(|pos| {
            let (x, y) = (xs[pos]?, ys[pos]?);
            Some(
                DataPoint::new(x, y)
                    .with_meta("row_position", pos)
                    .with_meta("row_index", rows.get(pos).copied().unwrap_or(pos)),
            )
        })
        .collect();

    let outliers = match ctx.report.and_then(SummaryReport::outlier_points) {
        Some(flagged) => flagged
            .iter()
            .filter_map(|point| {
                let pos = rows.iter().position(|&r| r == point.row_index)?;
                let (x, y) = (*xs.get(pos)?, *ys.get(pos)?);
                Some(
                    DataPoint::new(x?, y?)
                        .with_meta("row_position", pos)
                        .with_meta("row_index", point.row_index)
                        .with_meta("col_index", point.col_index)
                        .with_meta("z_score", point.z_score),
                )
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(VisualizationModel::PointPlot {
        title: ctx.title.to_string(),
        plot_kind: ctx.plot_kind,
        x_label: x_name.to_string(),
        y_label: y_name.to_string(),
        points,
        outliers,
        annotations: Vec::new(),
    })
}

fn build_heatmap(ctx: &BuildContext<'_>) -> Result<VisualizationModel> {
    let heatmaps = ctx.report.map(SummaryReport::heatmaps).unwrap_or_default();
    match heatmaps.as_slice() {
        [
            SummaryMetric::Heatmap {
                matrix,
                row_labels,
                col_labels,
                ..
            },
        ] => Ok(VisualizationModel::Heatmap {
            title: ctx.title.to_string(),
            matrix: matrix.clone(),
            row_labels: row_labels.clone(),
            col_labels: col_labels.clone(),
        }),
        other => Err(QuarryError::MissingHeatmap(other.len())),
    }
}

/// Pick the x and y columns. Requested columns must be numeric.
fn select_axes<'a>(ctx: &BuildContext<'a>) -> Result<(&'a str, &'a str)> {
    let data = ctx.data;
    let numeric = data.numeric_names();

    let requested = |name: &'a str| -> Result<&'a str> {
        if data.numeric.contains_key(name) {
            Ok(name)
        } else {
            Err(QuarryError::NotNumeric(name.to_string()))
        }
    };

    let x = match ctx.x_column {
        Some(name) => requested(name)?,
        None => *numeric.first().ok_or(QuarryError::NoNumericColumns)?,
    };

    let y = match ctx.y_column {
        Some(name) => requested(name)?,
        None => numeric.iter().copied().find(|&name| name != x).unwrap_or(x),
    };

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataSubsetSpec;
    use crate::stats::OutlierPoint;

    fn data() -> DataSubsetData {
        DataSubsetData::new(DataSubsetSpec::new("s", ["a", "b", "c"], vec![3, 4, 5]))
            .with_numeric("a", vec![Some(1.0), Some(2.0), Some(3.0)])
            .with_numeric("b", vec![Some(10.0), Some(20.0), Some(30.0)])
            .with_categorical("c", vec![Some("x".into()); 3])
    }

    fn ctx<'a>(data: &'a DataSubsetData, kind: PlotKind) -> BuildContext<'a> {
        BuildContext {
            title: "plot",
            plot_kind: kind,
            data,
            report: None,
            x_column: None,
            y_column: None,
        }
    }

    fn outlier_report(rows: &[usize]) -> SummaryReport {
        let spec = DataSubsetSpec::new("s", ["a", "b"], vec![3, 4, 5]);
        SummaryReport::new(
            1,
            "r",
            spec.clone(),
            vec![SummaryMetric::Outliers {
                subset: spec,
                z_threshold: 3.0,
                points: rows
                    .iter()
                    .map(|&row_index| OutlierPoint {
                        row_index,
                        col_index: 0,
                        z_score: 3.5,
                    })
                    .collect(),
            }],
        )
    }

    #[test]
    fn test_default_axes_and_points() {
        let data = data();
        let model = build_model(&ctx(&data, PlotKind::Scatter)).unwrap();

        let VisualizationModel::PointPlot {
            x_label,
            y_label,
            points,
            outliers,
            annotations,
            ..
        } = model
        else {
            panic!("expected a point plot");
        };
        assert_eq!((x_label.as_str(), y_label.as_str()), ("a", "b"));
        assert_eq!(points.len(), 3);
        assert_eq!((points[1].x, points[1].y), (2.0, 20.0));
        assert_eq!(points[1].row_index(), Some(4));
        assert!(outliers.is_empty());
        assert!(annotations.is_empty());
    }

    #[test]
    fn test_single_numeric_column_uses_it_twice() {
        let data = DataSubsetData::new(DataSubsetSpec::new("s", ["a"], vec![0]))
            .with_numeric("a", vec![Some(5.0)]);
        let model = build_model(&ctx(&data, PlotKind::Line)).unwrap();
        assert!(matches!(
            model,
            VisualizationModel::PointPlot { ref x_label, ref y_label, .. } if x_label == "a" && y_label == "a"
        ));
    }

    #[test]
    fn test_requested_axes_must_be_numeric() {
        let data = data();
        let mut request = ctx(&data, PlotKind::Bar);
        request.x_column = Some("b");
        request.y_column = Some("a");
        let model = build_model(&request).unwrap();
        assert!(matches!(model, VisualizationModel::PointPlot { ref x_label, .. } if x_label == "b"));

        request.y_column = Some("c");
        assert!(matches!(build_model(&request), Err(QuarryError::NotNumeric(_))));
    }

    #[test]
    fn test_no_numeric_columns() {
        let data = DataSubsetData::new(DataSubsetSpec::new("s", ["c"], vec![0]))
            .with_categorical("c", vec![Some("x".into())]);
        assert!(matches!(
            build_model(&ctx(&data, PlotKind::Histogram)),
            Err(QuarryError::NoNumericColumns)
        ));
    }

    #[test]
    fn test_outlier_overlay_is_aligned() {
        let data = data();
        // Row 9 is not part of the view and is skipped.
        let report = outlier_report(&[5, 9, 5]);
        let mut request = ctx(&data, PlotKind::Scatter);
        request.report = Some(&report);

        let VisualizationModel::PointPlot { points, outliers, .. } = build_model(&request).unwrap()
        else {
            panic!("expected a point plot");
        };
        assert_eq!(points.len(), 3);
        assert_eq!(outliers.len(), 2);
        assert_eq!((outliers[0].x, outliers[0].y), (3.0, 30.0));
        assert_eq!(outliers[0].row_index(), Some(5));
        assert_eq!(outliers[0].metadata["row_position"], 2);
    }

    #[test]
    fn test_heatmap_requires_exactly_one() {
        let data = data();
        let mut request = ctx(&data, PlotKind::Heatmap);
        assert!(matches!(build_model(&request), Err(QuarryError::MissingHeatmap(0))));

        let spec = DataSubsetSpec::new("s", ["a", "b"], vec![3, 4, 5]);
        let correlation = SummaryMetric::CorrelationMatrix {
            subset: spec.clone(),
            matrix: vec![vec![1.0, 0.9], vec![0.9, 1.0]],
            variable_names: vec!["a".into(), "b".into()],
        };
        let heatmap = correlation.heatmap_of().unwrap();

        let one = SummaryReport::new(1, "r", spec.clone(), vec![correlation, heatmap.clone()]);
        request.report = Some(&one);
        let model = build_model(&request).unwrap();
        assert!(matches!(
            model,
            VisualizationModel::Heatmap { ref matrix, ref row_labels, .. }
                if matrix[0][1] == 0.9 && row_labels == &["a", "b"]
        ));

        let two = SummaryReport::new(2, "r", spec, vec![heatmap.clone(), heatmap]);
        request.report = Some(&two);
        assert!(matches!(build_model(&request), Err(QuarryError::MissingHeatmap(2))));
    }

    #[test]
    fn test_every_kind_has_a_builder() {
        for kind in PlotKind::ALL {
            assert!(BUILDERS.iter().any(|(k, _)| *k == kind));
        }
    }
}
