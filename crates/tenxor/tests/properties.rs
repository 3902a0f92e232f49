use rand::{rngs::StdRng, Rng, SeedableRng};
use tenxor::tensor::{
    index_to_position, position_to_index, positions, shape, ErrorKind, Tensor, TensorError,
    TensorLike,
};
use tenxor::tensor_ops::{pointwise::pointwise, reduce};

fn random_shape(rng: &mut StdRng) -> Vec<usize> {
    let rank = rng.random_range(1..=4);
    (0..rank).map(|_| rng.random_range(1..=4)).collect()
}

#[test]
fn index_position_round_trip() -> Result<(), TensorError> {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let shape = random_shape(&mut rng);
        for i in 0..shape::numel(&shape) {
            let pos = index_to_position(i, &shape)?;
            assert_eq!(position_to_index(&pos, &shape)?, i);
        }
    }
    Ok(())
}

#[test]
fn stepper_visits_every_position_in_flat_order() -> Result<(), TensorError> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let shape = random_shape(&mut rng);
        let t = Tensor::from_shape_fn(&shape, |_| 0u8)?;

        let mut pos = vec![0; shape.len()];
        let mut visited = 0;
        loop {
            assert_eq!(position_to_index(&pos, &shape)?, visited);
            visited += 1;
            if !t.step(&mut pos) {
                break;
            }
        }
        assert_eq!(visited, shape::numel(&shape));
        assert_eq!(positions(&shape).count(), visited);
    }
    Ok(())
}

#[test]
fn reshape_preserves_flat_order() -> Result<(), TensorError> {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let shape = random_shape(&mut rng);
        let n = shape::numel(&shape);
        let t = Tensor::from_shape_vec(&shape, (0..n).collect())?;

        // flatten, then fold back into rows of the last dimension
        let flat = t.view(&shape::reshape(t.shape(), &[-1])?)?;
        assert_eq!(flat.shape(), &[n]);
        let last = shape[shape.len() - 1] as isize;
        let rows = flat.view(&shape::reshape(flat.shape(), &[-1, last])?)?;

        assert_eq!(flat.as_slice(), t.as_slice());
        assert_eq!(rows.as_slice(), t.as_slice());
        for i in 0..n {
            let pos = index_to_position(i, rows.shape())?;
            assert_eq!(*rows.get(&pos)?, i);
        }
    }
    Ok(())
}

#[test]
fn unsqueeze_then_squeeze_is_identity() -> Result<(), TensorError> {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let shape = random_shape(&mut rng);
        let dim = rng.random_range(0..=shape.len()) as isize;
        let expanded = shape::unsqueeze(&shape, dim)?;
        assert_eq!(expanded.len(), shape.len() + 1);
        assert_eq!(expanded[dim as usize], 1);
        let squeezed = shape::squeeze(&expanded, dim)?;
        assert_eq!(squeezed, shape);
        assert_eq!(shape::unsqueeze(&squeezed, dim)?, expanded);
    }
    Ok(())
}

#[test]
fn pointwise_outer_sum() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let rows = rng.random_range(1..=6);
        let cols = rng.random_range(1..=6);
        let a_values: Vec<i64> = (0..rows).map(|_| rng.random_range(-100..100)).collect();
        let b_values: Vec<i64> = (0..cols).map(|_| rng.random_range(-100..100)).collect();

        let a = Tensor::from_shape_slice(&[rows, 1], &a_values)?;
        let b = Tensor::from_shape_slice(&[1, cols], &b_values)?;
        let c = pointwise(&a, &b, |x, y| x + y)?;

        assert_eq!(c.shape(), &[rows, cols]);
        for i in 0..rows {
            for j in 0..cols {
                assert_eq!(*c.get(&[i, j])?, a_values[i] + b_values[j]);
            }
        }
    }
    Ok(())
}

#[test]
fn reduce_sums_rows_and_columns() -> Result<(), Box<dyn std::error::Error>> {
    let t = Tensor::from_shape_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?;

    let rows = reduce::reduce(&t, 1, 0.0, |acc, x| acc + x)?;
    assert_eq!(rows.shape(), &[2]);
    approx::assert_relative_eq!(rows.as_slice()[0], 6.0);
    approx::assert_relative_eq!(rows.as_slice()[1], 15.0);

    let cols = reduce::reduce(&t, 0, 0.0, |acc, x| acc + x)?;
    assert_eq!(cols.shape(), &[3]);
    assert_eq!(cols.as_slice(), &[5.0, 7.0, 9.0]);
    Ok(())
}

#[test]
fn reduce_matches_flat_sum() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..30 {
        let shape = random_shape(&mut rng);
        let n = shape::numel(&shape);
        let data: Vec<i64> = (0..n).map(|_| rng.random_range(-10..10)).collect();
        let total: i64 = data.iter().sum();
        let t = Tensor::from_shape_vec(&shape, data)?;

        for dim in 0..shape.len() {
            let agg = reduce::sum(&t, dim as isize)?;
            assert_eq!(agg.iter().sum::<i64>(), total);
            if shape.len() > 1 {
                assert_eq!(agg.rank(), shape.len() - 1);
            }
        }
    }
    Ok(())
}

#[test]
fn construction_rejects_wrong_cardinality() {
    let err = Tensor::from_shape_vec(&[2, 2], vec![1, 2, 3]).unwrap_err();
    assert_eq!(
        err,
        TensorError::InvalidShape {
            shape: vec![2, 2],
            expected: 4,
            actual: 3
        }
    );
    assert_eq!(err.kind(), ErrorKind::Construction);
}

#[test]
fn reshape_infers_a_single_dimension() -> Result<(), TensorError> {
    assert_eq!(shape::reshape(&[2, 3], &[-1, 3])?, vec![2, 3]);

    let err = shape::reshape(&[2, 3], &[-1, 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    Ok(())
}

#[test]
fn broadcast_reports_offending_dimension() {
    let err = shape::broadcast(&[2, 3], &[2, 4]).unwrap_err();
    assert_eq!(
        err,
        TensorError::BroadcastMismatch {
            dim: 1,
            lhs: vec![2, 3],
            rhs: vec![2, 4]
        }
    );
    assert_eq!(err.kind(), ErrorKind::Broadcast);
}
