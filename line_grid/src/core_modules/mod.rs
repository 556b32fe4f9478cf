pub mod contour;
pub mod contour_extractor;
pub mod dominant_region;
pub mod grid_quantizer;
pub mod line_fitter;
pub mod mask_refiner;
pub mod preprocessor;
pub mod segmenter;
