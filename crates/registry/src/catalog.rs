//! The built-in catalog.
//!
//! Rows are grouped under family headings. Declaration order is curatorial
//! preference: newer and more capable families first, and within a family
//! the flagship build before its alternatives. The selector relies on it.

use crate::{ModelDescriptor, features::SHADER_F16};

/// Ids curated as the low-VRAM picks of the catalog.
pub const LOW_VRAM_SHORTLIST: &[&str] = &[
    "Phi-3-mini-4k-instruct-q4f16_1-MLC-1k",
    "gemma-2b-it-q4f16_1-MLC",
    "gemma-2b-it-q4f32_1-MLC",
    "gemma-2b-it-q4f16_1-MLC-1k",
    "gemma-2b-it-q4f32_1-MLC-1k",
    "Qwen1.5-1.8B-Chat-q4f16_1-MLC-1k",
    "stablelm-2-zephyr-1_6b-q4f16_1-MLC-1k",
    "stablelm-2-zephyr-1_6b-q4f32_1-MLC-1k",
    "RedPajama-INCITE-Chat-3B-v1-q4f16_1-MLC-1k",
    "phi-1_5-q4f16_1-MLC",
    "phi-1_5-q4f32_1-MLC",
    "phi-1_5-q4f16_1-MLC-1k",
    "phi-1_5-q4f32_1-MLC-1k",
    "TinyLlama-1.1B-Chat-v0.4-q4f16_1-MLC",
    "TinyLlama-1.1B-Chat-v0.4-q4f32_1-MLC",
    "TinyLlama-1.1B-Chat-v0.4-q4f16_1-MLC-1k",
    "TinyLlama-1.1B-Chat-v0.4-q4f32_1-MLC-1k",
];

/// A catalog row as authored.
#[derive(Clone, Copy)]
struct Row {
    id: &'static str,
    vram_mb: f64,
    low: bool,
    features: &'static [&'static str],
    buffer: Option<u64>,
}

const fn row(id: &'static str, vram_mb: f64, low: bool) -> Row {
    Row {
        id,
        vram_mb,
        low,
        features: &[],
        buffer: None,
    }
}

impl Row {
    const fn f16(mut self) -> Self {
        self.features = &[SHADER_F16];
        self
    }

    const fn buffer(mut self, bytes: u64) -> Self {
        self.buffer = Some(bytes);
        self
    }

    fn descriptor(&self, family: &str) -> ModelDescriptor {
        let mut descriptor =
            ModelDescriptor::new(self.id, self.vram_mb, self.low).with_family(family);
        for feature in self.features {
            descriptor = descriptor.with_feature(*feature);
        }
        descriptor.buffer_size_required_bytes = self.buffer;
        descriptor
    }
}

#[rustfmt::skip]
static CATALOG: &[(&str, &[Row])] = &[
    ("Llama-3", &[
        row("Llama-3-8B-Instruct-q4f32_1-MLC-1k", 5295.7, true),
        row("Llama-3-8B-Instruct-q4f16_1-MLC-1k", 4598.34, true),
        row("Llama-3-8B-Instruct-q4f32_1-MLC", 6101.01, false),
        row("Llama-3-8B-Instruct-q4f16_1-MLC", 5001.0, false),
        row("Llama-3-70B-Instruct-q3f16_1-MLC", 31153.13, false),
    ]),
    ("Phi-3-mini", &[
        row("Phi-3-mini-4k-instruct-q4f16_1-MLC", 3672.07, false),
        row("Phi-3-mini-4k-instruct-q4f32_1-MLC", 5483.12, false),
        row("Phi-3-mini-4k-instruct-q4f16_1-MLC-1k", 2520.07, true),
        row("Phi-3-mini-4k-instruct-q4f32_1-MLC-1k", 3179.12, true),
    ]),
    ("Llama-2", &[
        row("Llama-2-7b-chat-hf-q4f32_1-MLC-1k", 5284.01, false),
        row("Llama-2-7b-chat-hf-q4f16_1-MLC-1k", 4618.52, false).f16(),
        row("Llama-2-7b-chat-hf-q4f32_1-MLC", 9109.03, false),
        row("Llama-2-7b-chat-hf-q4f16_1-MLC", 6749.02, false).f16(),
        row("Llama-2-13b-chat-hf-q4f16_1-MLC", 11814.09, false).f16(),
    ]),
    ("Mistral", &[
        row("WizardMath-7B-V1.1-q4f16_1-MLC", 6079.02, false).f16(),
        row("Mistral-7B-Instruct-v0.2-q4f16_1-MLC", 6079.02, false).f16(),
        row("OpenHermes-2.5-Mistral-7B-q4f16_1-MLC", 6079.02, false).f16(),
        row("NeuralHermes-2.5-Mistral-7B-q4f16_1-MLC", 6079.02, false).f16(),
    ]),
    ("Hermes-2-Pro", &[
        row("Hermes-2-Pro-Llama-3-8B-q4f16_1-MLC", 4976.13, false),
        row("Hermes-2-Pro-Llama-3-8B-q4f32_1-MLC", 6051.27, false),
        row("Hermes-2-Pro-Mistral-7B-q4f16_1-MLC", 4033.28, false).f16(),
    ]),
    ("Gemma-2B", &[
        row("gemma-2b-it-q4f16_1-MLC", 1476.52, false).f16().buffer(262_144_000),
        row("gemma-2b-it-q4f32_1-MLC", 1750.66, false).buffer(262_144_000),
        row("gemma-2b-it-q4f16_1-MLC-1k", 1476.52, true).f16().buffer(262_144_000),
        row("gemma-2b-it-q4f32_1-MLC-1k", 1750.66, true).buffer(262_144_000),
    ]),
    ("Qwen-1.5-1.8B", &[
        row("Qwen1.5-1.8B-Chat-q4f16_1-MLC", 2404.94, false),
        row("Qwen1.5-1.8B-Chat-q4f32_1-MLC", 3313.63, false),
        row("Qwen1.5-1.8B-Chat-q4f16_1-MLC-1k", 1828.94, true),
        row("Qwen1.5-1.8B-Chat-q4f32_1-MLC-1k", 2161.63, true),
    ]),
    ("StableLM-2-Zephyr-1.6B", &[
        row("stablelm-2-zephyr-1_6b-q4f16_1-MLC", 2087.66, false),
        row("stablelm-2-zephyr-1_6b-q4f32_1-MLC", 2999.33, false),
        row("stablelm-2-zephyr-1_6b-q4f16_1-MLC-1k", 1511.66, true),
        row("stablelm-2-zephyr-1_6b-q4f32_1-MLC-1k", 1847.33, true),
    ]),
    ("RedPajama-3B", &[
        row("RedPajama-INCITE-Chat-3B-v1-q4f16_1-MLC", 2972.09, false).f16(),
        row("RedPajama-INCITE-Chat-3B-v1-q4f32_1-MLC", 3928.09, false),
        row("RedPajama-INCITE-Chat-3B-v1-q4f16_1-MLC-1k", 2041.09, true).f16(),
        row("RedPajama-INCITE-Chat-3B-v1-q4f32_1-MLC-1k", 2558.09, true),
    ]),
    ("Phi-2", &[
        row("phi-2-q4f16_1-MLC", 3053.97, false).f16(),
        row("phi-2-q4f32_1-MLC", 4032.48, false),
        row("phi-2-q4f16_1-MLC-1k", 2131.97, true).f16(),
        row("phi-2-q4f32_1-MLC-1k", 2740.48, true),
    ]),
    ("Phi-1.5", &[
        row("phi-1_5-q4f16_1-MLC", 1210.09, true).f16(),
        row("phi-1_5-q4f32_1-MLC", 1682.09, true),
        row("phi-1_5-q4f16_1-MLC-1k", 1210.09, true).f16(),
        row("phi-1_5-q4f32_1-MLC-1k", 1682.09, true),
    ]),
    ("TinyLlama", &[
        row("TinyLlama-1.1B-Chat-v0.4-q4f16_1-MLC", 697.24, true).f16(),
        row("TinyLlama-1.1B-Chat-v0.4-q4f32_1-MLC", 839.98, true),
        row("TinyLlama-1.1B-Chat-v0.4-q4f16_1-MLC-1k", 675.24, true).f16(),
        row("TinyLlama-1.1B-Chat-v0.4-q4f32_1-MLC-1k", 795.98, true),
    ]),
];

/// Every built-in descriptor in declaration order, unvalidated.
pub fn descriptors() -> Vec<ModelDescriptor> {
    CATALOG
        .iter()
        .flat_map(|(family, rows)| rows.iter().map(move |row| row.descriptor(family)))
        .collect()
}
