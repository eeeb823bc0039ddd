/// `count` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// `count` values spaced evenly in log10 between `10^start_exponent` and
/// `10^stop_exponent`, both included.
pub fn logspace(start_exponent: f64, stop_exponent: f64, count: usize) -> Vec<f64> {
    linspace(start_exponent, stop_exponent, count)
        .into_iter()
        .map(|exponent| 10f64.powf(exponent))
        .collect()
}
