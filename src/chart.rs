use palette::named;
use palette::Srgb;

use crate::data::filter::FilteredView;
use crate::data::model::{
    CampaignRecord, Metric, BREAK_EVEN_COLUMN, CAC_COLUMN, CHANNEL_COLUMN,
    CONVERSION_RATE_COLUMN, CUSTOMERS_COLUMN, SPEND_COLUMN,
};

// ---------------------------------------------------------------------------
// Visualization modes
// ---------------------------------------------------------------------------

/// The six alternate chart views. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartMode {
    #[default]
    CacByChannel,
    CustomersVsCac,
    ConversionRates,
    BreakEvenCustomers,
    ActualVsBreakEven,
    SpendPerCustomer,
}

impl ChartMode {
    pub const ALL: [ChartMode; 6] = [
        ChartMode::CacByChannel,
        ChartMode::CustomersVsCac,
        ChartMode::ConversionRates,
        ChartMode::BreakEvenCustomers,
        ChartMode::ActualVsBreakEven,
        ChartMode::SpendPerCustomer,
    ];

    /// Label shown in the mode selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartMode::CacByChannel => "CAC by Marketing Channel",
            ChartMode::CustomersVsCac => "New Customers vs. CAC",
            ChartMode::ConversionRates => "Conversion Rates",
            ChartMode::BreakEvenCustomers => "Break-Even Customers",
            ChartMode::ActualVsBreakEven => "Actual vs. Break-Even Customers",
            ChartMode::SpendPerCustomer => "Spend per New Customer",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartMode::CacByChannel => "CAC by Marketing Channel",
            ChartMode::CustomersVsCac => "New Customers vs. CAC",
            ChartMode::ConversionRates => "Conversion Rates by Marketing Channel",
            ChartMode::BreakEvenCustomers => "Break-Even Customers by Marketing Channel",
            ChartMode::ActualVsBreakEven => "Actual vs. Break-Even Customers by Marketing Channel",
            ChartMode::SpendPerCustomer => "Spend per New Customer",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One bar per category; rows sharing a category stack.
    Bar,
    /// Several bar series side by side within each category.
    GroupedBar,
    Scatter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XValue {
    Category(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: XValue,
    pub y: Metric,
}

/// How the renderer should colour a series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesColor {
    /// Renderer's default accent colour.
    Default,
    /// The colour assigned to a marketing channel.
    Channel(String),
    Fixed(Srgb<u8>),
}

/// `y = slope * x + intercept`, drawn over `[x_min, x_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl TrendLine {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: SeriesColor,
    pub points: Vec<ChartPoint>,
    pub trend: Option<TrendLine>,
}

/// A renderable chart, independent of any UI toolkit.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub mode: ChartMode,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Categorical x-axis values in order of first appearance (bar kinds only).
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Number of points whose y value is undefined (not plotted).
    pub fn undefined_points(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| &s.points)
            .filter(|p| p.y.is_undefined())
            .count()
    }
}

// ---------------------------------------------------------------------------
// Mode → chart mapping
// ---------------------------------------------------------------------------

/// Build the chart for `mode` over the filtered rows. Pure: the same
/// inputs always give an identical description.
pub fn build_chart(mode: ChartMode, view: &FilteredView<'_>) -> ChartSpec {
    match mode {
        ChartMode::CacByChannel => bar_chart(mode, view, CAC_COLUMN, |r| r.metrics.cac),
        ChartMode::CustomersVsCac => scatter_chart(mode, view, CAC_COLUMN, true, |r| r.metrics.cac),
        ChartMode::ConversionRates => {
            bar_chart(mode, view, CONVERSION_RATE_COLUMN, |r| r.metrics.conversion_rate)
        }
        ChartMode::BreakEvenCustomers => {
            bar_chart(mode, view, BREAK_EVEN_COLUMN, |r| r.metrics.break_even_customers)
        }
        ChartMode::ActualVsBreakEven => actual_vs_break_even(view),
        ChartMode::SpendPerCustomer => {
            scatter_chart(mode, view, SPEND_COLUMN, false, |r| Metric::Defined(r.spend()))
        }
    }
}

fn channel_points(
    view: &FilteredView<'_>,
    y: impl Fn(&CampaignRecord) -> Metric,
) -> Vec<ChartPoint> {
    view.records()
        .map(|r| ChartPoint {
            x: XValue::Category(r.channel().to_string()),
            y: y(r),
        })
        .collect()
}

fn categories(view: &FilteredView<'_>) -> Vec<String> {
    view.channels().into_iter().map(str::to_string).collect()
}

fn bar_chart(
    mode: ChartMode,
    view: &FilteredView<'_>,
    y_column: &str,
    y: impl Fn(&CampaignRecord) -> Metric,
) -> ChartSpec {
    ChartSpec {
        mode,
        kind: ChartKind::Bar,
        title: mode.title().to_string(),
        x_label: CHANNEL_COLUMN.to_string(),
        y_label: y_column.to_string(),
        categories: categories(view),
        series: vec![Series {
            name: y_column.to_string(),
            color: SeriesColor::Default,
            points: channel_points(view, y),
            trend: None,
        }],
    }
}

/// One series per channel, x = new customers.
fn scatter_chart(
    mode: ChartMode,
    view: &FilteredView<'_>,
    y_column: &str,
    with_trend: bool,
    y: impl Fn(&CampaignRecord) -> Metric,
) -> ChartSpec {
    let series = view
        .channels()
        .into_iter()
        .map(|channel| {
            let points: Vec<ChartPoint> = view
                .records()
                .filter(|r| r.channel() == channel)
                .map(|r| ChartPoint {
                    x: XValue::Number(r.new_customers() as f64),
                    y: y(r),
                })
                .collect();
            let trend = if with_trend { fit_trend(&points) } else { None };
            Series {
                name: channel.to_string(),
                color: SeriesColor::Channel(channel.to_string()),
                points,
                trend,
            }
        })
        .collect();

    ChartSpec {
        mode,
        kind: ChartKind::Scatter,
        title: mode.title().to_string(),
        x_label: CUSTOMERS_COLUMN.to_string(),
        y_label: y_column.to_string(),
        categories: Vec::new(),
        series,
    }
}

fn actual_vs_break_even(view: &FilteredView<'_>) -> ChartSpec {
    let mode = ChartMode::ActualVsBreakEven;
    ChartSpec {
        mode,
        kind: ChartKind::GroupedBar,
        title: mode.title().to_string(),
        x_label: "Marketing Channel".to_string(),
        y_label: "Number of Customers".to_string(),
        categories: categories(view),
        series: vec![
            Series {
                name: "Actual Customers Acquired".to_string(),
                color: SeriesColor::Fixed(named::ROYALBLUE),
                points: channel_points(view, |r| Metric::Defined(r.new_customers() as f64)),
                trend: None,
            },
            Series {
                name: "Break-Even Customers".to_string(),
                color: SeriesColor::Fixed(named::LIGHTCORAL),
                points: channel_points(view, |r| r.metrics.break_even_customers),
                trend: None,
            },
        ],
    }
}

/// Ordinary least squares over the defined numeric points.
fn fit_trend(points: &[ChartPoint]) -> Option<TrendLine> {
    let xy: Vec<(f64, f64)> = points
        .iter()
        .filter_map(|p| match (&p.x, p.y) {
            (XValue::Number(x), Metric::Defined(y)) => Some((*x, y)),
            _ => None,
        })
        .collect();
    if xy.len() < 2 {
        return None;
    }

    let n = xy.len() as f64;
    let mean_x = xy.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = xy.iter().map(|(_, y)| y).sum::<f64>() / n;
    let sxx: f64 = xy.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = xy.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let slope = sxy / sxx;

    let x_min = xy.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let x_max = xy.iter().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);

    Some(TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
        x_min,
        x_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterSelection};
    use crate::data::loader::load_reader;
    use crate::data::model::CampaignDataset;

    fn dataset() -> CampaignDataset {
        let csv = "Marketing_Channel,Marketing_Spend,New_Customers\n\
                   Email,100,10\n\
                   Social,200,0\n\
                   Email,300,20\n\
                   Email,600,30\n";
        load_reader(csv.as_bytes()).unwrap()
    }

    fn all_indices(ds: &CampaignDataset) -> Vec<usize> {
        filtered_indices(ds, &FilterSelection::all(ds))
    }

    #[test]
    fn every_mode_maps_to_its_chart_kind() {
        let ds = dataset();
        let idx = all_indices(&ds);
        let view = FilteredView::new(&ds, &idx);
        let kinds: Vec<ChartKind> = ChartMode::ALL
            .iter()
            .map(|&m| build_chart(m, &view).kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Bar,
                ChartKind::Scatter,
                ChartKind::Bar,
                ChartKind::Bar,
                ChartKind::GroupedBar,
                ChartKind::Scatter,
            ]
        );
    }

    #[test]
    fn cac_bar_keeps_row_order_and_undefined_sentinel() {
        let ds = dataset();
        let idx = all_indices(&ds);
        let chart = build_chart(ChartMode::CacByChannel, &FilteredView::new(&ds, &idx));
        assert_eq!(chart.categories, vec!["Email", "Social"]);
        assert_eq!(chart.x_label, "Marketing_Channel");
        assert_eq!(chart.y_label, "CAC");
        let ys: Vec<Metric> = chart.series[0].points.iter().map(|p| p.y).collect();
        assert_eq!(
            ys,
            vec![
                Metric::Defined(10.0),
                Metric::Undefined,
                Metric::Defined(15.0),
                Metric::Defined(20.0),
            ]
        );
        assert_eq!(chart.undefined_points(), 1);
    }

    #[test]
    fn scatter_has_one_series_per_channel_with_trend() {
        let ds = dataset();
        let idx = all_indices(&ds);
        let chart = build_chart(ChartMode::CustomersVsCac, &FilteredView::new(&ds, &idx));
        assert_eq!(chart.series.len(), 2);

        let email = &chart.series[0];
        assert_eq!(email.name, "Email");
        assert_eq!(email.color, SeriesColor::Channel("Email".into()));
        let trend = email.trend.unwrap();
        assert!((trend.slope - 0.5).abs() < 1e-9);
        assert!((trend.at(10.0) - 10.0).abs() < 1e-9);
        assert_eq!((trend.x_min, trend.x_max), (10.0, 30.0));

        // A single undefined point cannot carry a fit.
        assert_eq!(chart.series[1].trend, None);
    }

    #[test]
    fn spend_scatter_has_no_trend() {
        let ds = dataset();
        let idx = all_indices(&ds);
        let chart = build_chart(ChartMode::SpendPerCustomer, &FilteredView::new(&ds, &idx));
        assert!(chart.series.iter().all(|s| s.trend.is_none()));
        assert_eq!(chart.series[0].points[0].x, XValue::Number(10.0));
        assert_eq!(chart.series[0].points[0].y, Metric::Defined(100.0));
    }

    #[test]
    fn grouped_bar_pairs_actual_and_break_even() {
        let ds = dataset();
        let idx = all_indices(&ds);
        let chart = build_chart(ChartMode::ActualVsBreakEven, &FilteredView::new(&ds, &idx));
        assert_eq!(chart.series.len(), 2);
        let actual = &chart.series[0];
        let break_even = &chart.series[1];
        assert_eq!(actual.color, SeriesColor::Fixed(named::ROYALBLUE));
        for (a, b) in actual.points.iter().zip(&break_even.points) {
            assert_eq!(a.x, b.x);
            if let Metric::Defined(be) = b.y {
                assert!((be - a.y.value().unwrap()).abs() < 1e-9);
            }
        }
        assert_eq!(break_even.points[1].y, Metric::Undefined);
    }

    #[test]
    fn empty_view_gives_empty_chart_for_every_mode() {
        let ds = dataset();
        let view = FilteredView::new(&ds, &[]);
        for mode in ChartMode::ALL {
            let chart = build_chart(mode, &view);
            assert!(chart.is_empty(), "{mode:?} should be empty");
            assert_eq!(chart.title, mode.title());
        }
    }

    #[test]
    fn switching_modes_back_reproduces_the_chart() {
        let ds = dataset();
        let idx = all_indices(&ds);
        let view = FilteredView::new(&ds, &idx);
        let first = build_chart(ChartMode::CustomersVsCac, &view);
        let _other = build_chart(ChartMode::ConversionRates, &view);
        let again = build_chart(ChartMode::CustomersVsCac, &view);
        assert_eq!(first, again);
    }

    #[test]
    fn default_mode_is_cac_by_channel() {
        assert_eq!(ChartMode::default(), ChartMode::ALL[0]);
    }
}
