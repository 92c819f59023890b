use hungarian::Hungarian;

fn main() {
    #[rustfmt::skip]
    let mut costs = nalgebra::DMatrix::from_row_slice(3, 4, &[
        10., 10., 8., 11.,
         9.,  8., 1.,  1.,
         9.,  7., 4., 10.,
    ]);

    let mut solver = Hungarian::new(&mut costs).expect("valid cost matrix");
    for (row, col) in solver.assignments().assignment() {
        println!("row {row} -> col {col}");
    }
    println!("total: {}", solver.value());
    if let Some(stats) = solver.statistics() {
        println!("{stats}");
    }
    drop(solver);

    // solving pads and reduces the borrowed matrix
    println!("working matrix: {costs}");
}
