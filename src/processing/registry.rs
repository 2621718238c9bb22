// src/processing/registry.rs
use std::collections::HashMap;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::processing::bands::{BandSet, ImageType, IndexRaster};
use crate::processing::indices::{
    CanopyCover, ChlorophyllIndex, ExcessGreen, IndexCalculator, MGRVI, MSAVI, NDI, RGBVI, SAVI,
};

/// Named index calculators available for one image type.
pub struct IndexRegistry {
    image_type: ImageType,
    names: Vec<String>,
    calculators: HashMap<String, Box<dyn IndexCalculator>>,
}

impl IndexRegistry {
    pub fn empty(image_type: ImageType) -> Self {
        Self {
            image_type,
            names: Vec::new(),
            calculators: HashMap::new(),
        }
    }

    /// Built-in indices for `image_type`, in their canonical order.
    pub fn for_image_type(image_type: ImageType) -> Self {
        let mut registry = Self::empty(image_type);
        match image_type {
            ImageType::Rgb => {
                registry.register(ExcessGreen::exg());
                registry.register(NDI::grvi().with_alpha());
                registry.register(MGRVI);
                registry.register(RGBVI);
                registry.register(ExcessGreen::exgr());
                registry.register(CanopyCover::default());
            }
            ImageType::Multi => {
                registry.register(NDI::ndvi());
                registry.register(NDI::ndre());
                registry.register(NDI::gndvi());
                registry.register(SAVI::savi());
                registry.register(SAVI::osavi());
                registry.register(MSAVI);
                registry.register(ChlorophyllIndex::gci());
                registry.register(ChlorophyllIndex::reci());
                registry.register(NDI::grvi());
            }
        }
        registry
    }

    /// Add a calculator under its own name, replacing any previous one.
    pub fn register<I: IndexCalculator + 'static>(&mut self, calculator: I) {
        let name = calculator.name().to_lowercase();
        if !self.calculators.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.calculators.insert(name, Box::new(calculator));
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calculators.contains_key(&name.to_lowercase())
    }

    pub fn get(&self, name: &str) -> Result<&dyn IndexCalculator> {
        self.calculators
            .get(&name.to_lowercase())
            .map(|calculator| calculator.as_ref())
            .ok_or_else(|| Error::UnknownIndex {
                name: name.to_string(),
                image_type: self.image_type,
                valid: self.names.iter().join(", "),
            })
    }

    /// Compute one named index, attaching the source alpha when the index carries it.
    pub fn compute<'a>(&self, name: &str, bands: &'a BandSet) -> Result<IndexRaster<'a>> {
        let calculator = self.get(name)?;
        let values = calculator.calculate(bands)?;
        let alpha = if calculator.carries_alpha() {
            bands.alpha()
        } else {
            None
        };

        Ok(IndexRaster {
            name: calculator.name().to_string(),
            values,
            alpha,
        })
    }
}
