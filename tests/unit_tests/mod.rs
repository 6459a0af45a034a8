mod model;
mod settings;
