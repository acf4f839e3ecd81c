use serde::{Deserialize, Serialize};
use serde_json::Value;
use shapelet_rs::prelude::*;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Serialize)]
struct ValidationData {
    name: String,
    notes: String,
    input: InputData,
    params: Params,
    #[serde(skip_deserializing)]
    result: ResultData,
}

#[derive(Debug, Deserialize, Serialize)]
struct InputData {
    x: Vec<f64>,
    y: Vec<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Params {
    order: usize,
    ellipse: EllipseData,
    psf: Option<PsfData>,
    #[serde(flatten)]
    extra: Option<Value>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
struct EllipseData {
    ixx: f64,
    iyy: f64,
    ixy: f64,
    cx: f64,
    cy: f64,
}

impl EllipseData {
    fn to_ellipse(self) -> Ellipse {
        Ellipse::new(
            Quadrupole::new(self.ixx, self.iyy, self.ixy),
            Point2::new(self.cx, self.cy),
        )
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct PsfData {
    order: usize,
    ellipse: EllipseData,
    coefficients: Vec<f64>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
struct ResultData {
    rows: usize,
    cols: usize,
    matrix: Vec<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = Path::new("../output/reference");
    let output_dir = Path::new("../output/shapelet_rs");

    if !input_dir.exists() {
        eprintln!(
            "Input directory {:?} does not exist. Run reference.py first.",
            input_dir
        );
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            println!("Processing {:?}", path.file_name().unwrap());
            process_file(&path, output_dir)?;
        }
    }

    Ok(())
}

fn process_file(input_path: &Path, output_dir: &Path) -> Result<(), Box<dyn Error>> {
    let file = fs::File::open(input_path)?;
    let mut data: ValidationData = serde_json::from_reader(file)?;

    let ellipse = data.params.ellipse.to_ellipse();

    let mut builder = match &data.params.psf {
        None => DesignMatrix::<f64>::new()
            .samples(&data.input.x, &data.input.y)
            .order(data.params.order)
            .build()?,
        Some(psf) => {
            let psf = ShapeletFunction::new(
                psf.order,
                psf.ellipse.to_ellipse(),
                psf.coefficients.clone(),
            )?;
            DesignMatrix::<f64>::new()
                .samples(&data.input.x, &data.input.y)
                .order(data.params.order)
                .psf(&psf)
                .build()?
        }
    };

    let matrix = builder.to_matrix(&ellipse)?;
    data.result = ResultData {
        rows: builder.sample_count(),
        cols: builder.basis_size(),
        matrix,
    };

    let output_path = output_dir.join(input_path.file_name().unwrap());
    let output_json = serde_json::to_string_pretty(&data)?;
    fs::write(output_path, output_json)?;

    Ok(())
}
