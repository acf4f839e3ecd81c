//! Combined Visualization Examples for Shapelet Design Matrices
//!
//! This script runs multiple scenarios to generate CSV data for visualization.
//! It covers:
//! 1. Basis Column Profiles (the packed order-2 columns along an axis)
//! 2. Convolution Broadening (a model before and after an analytic PSF)
//! 3. Variant Agreement (direct vs basis-remapped evaluation paths)
//! 4. Radius Sweep (Gaussian column peak and flux against closed forms)
//! 5. Profile Mixing (inner and outer components behind one amplitude)

use shapelet_rs::prelude::*;
use std::fs::File;
use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Running All Visualization Examples...");
    println!("=====================================");
    println!();

    // Ensure output directory exists
    let output_dir = "../output/visual/";
    std::fs::create_dir_all(output_dir)?;
    println!("Output directory: {}", output_dir);
    println!();

    run_basis_profiles()?;
    println!();

    run_convolution_broadening()?;
    println!();

    run_variant_agreement()?;
    println!();

    run_radius_sweep()?;
    println!();

    run_profile_mixing()?;
    println!();

    println!("All examples completed successfully.");
    Ok(())
}

/// Sample positions along the x axis with y pinned to zero.
fn axis_slice() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..=120).map(|i| f64::from(i) * 0.1 - 6.0).collect();
    let y = vec![0.0; x.len()];
    (x, y)
}

/// 1. Basis Column Profiles
fn run_basis_profiles() -> Result<(), Box<dyn std::error::Error>> {
    let (x, y) = axis_slice();
    let ellipse = Ellipse::from_core(Quadrupole::circle(1.5));

    let mut builder = DesignMatrix::<f64>::new()
        .samples(&x, &y)
        .order(2)
        .build()?;
    let matrix = builder.to_matrix(&ellipse)?;

    let path = "../output/visual/basis_profiles.csv";
    let mut file = File::create(path)?;
    writeln!(file, "x,psi_00,psi_10,psi_01,psi_20,psi_11,psi_02")?;
    for (i, &xi) in x.iter().enumerate() {
        let row = &matrix[i * 6..(i + 1) * 6];
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            xi, row[0], row[1], row[2], row[3], row[4], row[5]
        )?;
    }

    // Leading column peak against the closed form det / sqrt(pi).
    let peak = matrix
        .chunks_exact(6)
        .map(|row| row[0])
        .fold(f64::MIN, f64::max);
    let closed_form = 1.0 / (1.5 * 1.5 * std::f64::consts::PI.sqrt());

    println!("1. Basis Column Profiles");
    println!("------------------------");
    println!("Order-2 columns on a circle of radius 1.5, sampled along y = 0");
    println!(
        "Leading column peak: {:.6} (closed form {:.6})",
        peak, closed_form
    );
    println!("Results exported to {}", path);

    Ok(())
}

/// 2. Convolution Broadening
fn run_convolution_broadening() -> Result<(), Box<dyn std::error::Error>> {
    let galaxy = ShapeletFunction::gaussian(Ellipse::from_core(Quadrupole::circle(2.0)), 1.0);
    let psf = ShapeletFunction::gaussian(Ellipse::from_core(Quadrupole::circle(1.2)), 1.0);
    let convolved = galaxy.convolved(&psf)?;

    let mut galaxy_eval = galaxy.evaluator()?;
    let mut psf_eval = psf.evaluator()?;
    let mut convolved_eval = convolved.evaluator()?;

    let (x, _) = axis_slice();
    let path = "../output/visual/convolution_broadening.csv";
    let mut file = File::create(path)?;
    writeln!(file, "x,galaxy,psf,convolved")?;
    for &xi in &x {
        writeln!(
            file,
            "{},{},{},{}",
            xi,
            galaxy_eval.evaluate(xi, 0.0),
            psf_eval.evaluate(xi, 0.0),
            convolved_eval.evaluate(xi, 0.0)
        )?;
    }

    println!("2. Convolution Broadening");
    println!("-------------------------");
    println!(
        "Second moment ixx: galaxy {:.2} -> convolved {:.2}",
        galaxy.ellipse().core.ixx,
        convolved.ellipse().core.ixx
    );
    println!(
        "Flux: galaxy {:.6}, convolved {:.6}",
        galaxy.integrate(),
        convolved.integrate()
    );
    println!("Results exported to {}", path);

    Ok(())
}

/// 3. Variant Agreement
fn run_variant_agreement() -> Result<(), Box<dyn std::error::Error>> {
    // A dense stamp; the y = 0 row goes to the CSV.
    let mut x = Vec::new();
    let mut y = Vec::new();
    for iy in 0..49 {
        for ix in 0..49 {
            x.push(f64::from(ix) * 0.25 - 6.0);
            y.push(f64::from(iy) * 0.25 - 6.0);
        }
    }

    let ellipse = Ellipse::from_core(Quadrupole::new(2.5, 2.0, 0.4));
    let psf = ShapeletFunction::gaussian(Ellipse::from_core(Quadrupole::circle(1.0)), 1.0);

    // Remapping an order-2 model through an identity matrix must agree
    // with the direct path.
    let mut identity = vec![0.0; 36];
    for i in 0..6 {
        identity[i * 7] = 1.0;
    }
    let mut basis = MultiShapeletBasis::new(6);
    basis.add_component(1.0, 2, identity)?;

    let direct = MatrixBuilder::<f64>::with_order(&x, &y, 2)?.to_matrix(&ellipse)?;
    let remapped = MatrixBuilder::<f64>::with_basis(&x, &y, &basis)?.to_matrix(&ellipse)?;
    let convolved_direct = MatrixBuilder::<f64>::with_psf(&x, &y, 2, &psf)?.to_matrix(&ellipse)?;
    let convolved_remapped = MatrixBuilder::<f64>::with_convolved_basis(
        &x,
        &y,
        &basis,
        &MultiShapeletFunction::from(psf.clone()),
    )?
    .to_matrix(&ellipse)?;

    let max_plain = direct
        .iter()
        .zip(&remapped)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    let max_convolved = convolved_direct
        .iter()
        .zip(&convolved_remapped)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);

    let path = "../output/visual/variant_agreement.csv";
    let mut file = File::create(path)?;
    writeln!(file, "x,direct,remapped,convolved_direct,convolved_remapped")?;
    for s in 0..x.len() {
        if y[s] == 0.0 {
            writeln!(
                file,
                "{},{},{},{},{}",
                x[s],
                direct[s * 6],
                remapped[s * 6],
                convolved_direct[s * 6],
                convolved_remapped[s * 6]
            )?;
        }
    }

    println!("3. Variant Agreement");
    println!("--------------------");
    println!("Max |direct - remapped|:           {:.3e}", max_plain);
    println!("Max |convolved paths difference|:  {:.3e}", max_convolved);
    println!("Results exported to {}", path);

    Ok(())
}

/// 4. Radius Sweep
fn run_radius_sweep() -> Result<(), Box<dyn std::error::Error>> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for iy in 0..49 {
        for ix in 0..49 {
            x.push(f64::from(ix) * 0.5 - 12.0);
            y.push(f64::from(iy) * 0.5 - 12.0);
        }
    }
    let mut builder = MatrixBuilder::<f64>::with_order(&x, &y, 0)?;

    println!("4. Radius Sweep");
    println!("---------------");

    let path = "../output/visual/radius_sweep.csv";
    let mut file = File::create(path)?;
    writeln!(file, "radius,peak,closed_form_peak,grid_flux")?;

    for radius in [0.5, 1.0, 1.5, 2.0, 2.5, 3.0] {
        let matrix = builder.to_matrix(&Ellipse::from_core(Quadrupole::circle(radius)))?;
        let peak = matrix.iter().cloned().fold(f64::MIN, f64::max);
        let closed_form = 1.0 / (radius * radius * std::f64::consts::PI.sqrt());
        let flux: f64 = matrix.iter().sum::<f64>() * 0.25;

        println!(
            "Radius {:.1}: peak = {:.6} (closed form {:.6}), grid flux = {:.6}",
            radius, peak, closed_form, flux
        );
        writeln!(file, "{},{},{},{}", radius, peak, closed_form, flux)?;
    }

    println!(
        "Expected flux at every radius: {:.6}",
        ShapeletFunction::FLUX_FACTOR
    );
    println!("Results exported to {}", path);

    Ok(())
}

/// 5. Profile Mixing
fn run_profile_mixing() -> Result<(), Box<dyn std::error::Error>> {
    let (x, y) = axis_slice();
    let ellipse = Ellipse::from_core(Quadrupole::circle(1.0));

    let mut inner = MultiShapeletBasis::new(1);
    inner.add_component(0.6, 0, vec![0.6])?;
    let mut outer = MultiShapeletBasis::new(1);
    outer.add_component(2.0, 0, vec![0.4])?;
    let mut combined = MultiShapeletBasis::new(1);
    combined
        .add_component(0.6, 0, vec![0.6])?
        .add_component(2.0, 0, vec![0.4])?;

    let inner_matrix = MatrixBuilder::<f64>::with_basis(&x, &y, &inner)?.to_matrix(&ellipse)?;
    let outer_matrix = MatrixBuilder::<f64>::with_basis(&x, &y, &outer)?.to_matrix(&ellipse)?;
    let combined_matrix =
        MatrixBuilder::<f64>::with_basis(&x, &y, &combined)?.to_matrix(&ellipse)?;

    let max_diff = combined_matrix
        .iter()
        .zip(inner_matrix.iter().zip(&outer_matrix))
        .map(|(c, (i, o))| (c - i - o).abs())
        .fold(0.0, f64::max);

    let path = "../output/visual/profile_mixing.csv";
    let mut file = File::create(path)?;
    writeln!(file, "x,inner,outer,combined")?;
    for s in 0..x.len() {
        writeln!(
            file,
            "{},{},{},{}",
            x[s], inner_matrix[s], outer_matrix[s], combined_matrix[s]
        )?;
    }

    println!("5. Profile Mixing");
    println!("-----------------");
    println!("Max |combined - (inner + outer)|: {:.3e}", max_diff);
    println!(
        "Center ratio inner/outer: {:.3}",
        inner_matrix[60] / outer_matrix[60]
    );
    println!("Results exported to {}", path);

    Ok(())
}
