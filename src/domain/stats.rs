//! Pure statistics helpers for the correlation section of the report.

#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient. Returns 0.0 for degenerate input
/// (mismatched lengths or zero variance) instead of NaN.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }

    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        cov / denom
    }
}

pub fn correlation_matrix(series: &[(&str, Vec<f64>)]) -> CorrelationMatrix {
    let labels = series.iter().map(|(name, _)| name.to_string()).collect();
    let values = series
        .iter()
        .map(|(_, a)| series.iter().map(|(_, b)| pearson(a, b)).collect())
        .collect();

    CorrelationMatrix { labels, values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints_and_length() {
        let v = linspace(13.4, 9.8, 11);
        assert_eq!(v.len(), 11);
        assert!((v[0] - 13.4).abs() < 1e-9);
        assert!((v[10] - 9.8).abs() < 1e-9);
        // strictly decreasing
        assert!(v.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_linspace_degenerate_sizes() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let a = vec![1.0, 2.0, 3.0, 4.0];
        let b = vec![2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_perfect_anticorrelation() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![3.0, 2.0, 1.0];
        assert!((pearson(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_zero_variance_is_zero_not_nan() {
        let a = vec![5.0, 5.0, 5.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(pearson(&a, &b), 0.0);
    }

    #[test]
    fn test_correlation_matrix_is_symmetric_with_unit_diagonal() {
        let matrix = correlation_matrix(&[
            ("a", vec![1.0, 2.0, 3.0, 4.0]),
            ("b", vec![4.0, 3.0, 2.0, 1.0]),
            ("c", vec![1.0, 3.0, 2.0, 4.0]),
        ]);

        assert_eq!(matrix.len(), 3);
        for i in 0..3 {
            assert!((matrix.values[i][i] - 1.0).abs() < 1e-9);
            for j in 0..3 {
                assert!((matrix.values[i][j] - matrix.values[j][i]).abs() < 1e-9);
            }
        }
    }
}
