pub mod version_detection;
