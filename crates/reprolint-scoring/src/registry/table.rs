//! Built-in action requirements
//!
//! What must be stated for each kind of experimental step to be reproducible,
//! following protocols.io, Bio-protocol and JoVE reporting practice. This table
//! is data: adding an action type means adding a row here (or shipping a JSON
//! extension document), never touching the scoring code.

/// One row of the requirements table
#[derive(Debug, Clone, Copy)]
pub struct RequirementSpec {
    pub action: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub description: &'static str,
}

pub const BUILTIN_REQUIREMENTS: &[RequirementSpec] = &[
    // Sample preparation
    RequirementSpec {
        action: "prepare_sample",
        required: &["sample_type", "preparation_method"],
        optional: &["passage_number", "cell_density", "culture_medium", "substrate"],
        description: "Sample preparation",
    },
    RequirementSpec {
        action: "seeding",
        required: &["cell_line", "seeding_density", "medium"],
        optional: &["volume", "plate_type", "coating", "passage_number", "culture_conditions"],
        description: "Cell seeding and plating",
    },
    RequirementSpec {
        action: "embed",
        required: &["embedding_medium"],
        optional: &["temperature", "duration_min", "preparation_method"],
        description: "Sample embedding for sectioning",
    },
    RequirementSpec {
        action: "formulation",
        required: &["components"],
        optional: &["ratios", "mixing_method", "storage_conditions"],
        description: "Formulation of solutions or compounds",
    },
    // Fixation and staining
    RequirementSpec {
        action: "fix",
        // temperature may be given as "room temperature"
        required: &["fixative", "fixative_concentration", "duration_min", "temperature"],
        optional: &["fixative_volume", "wash_buffer", "number_of_washes", "container_type"],
        description: "Chemical fixation of biological samples",
    },
    RequirementSpec {
        action: "permeabilize",
        required: &["detergent", "detergent_concentration", "duration_min"],
        optional: &["temperature", "buffer_composition", "wash_steps"],
        description: "Membrane permeabilization for antibody access",
    },
    RequirementSpec {
        action: "block",
        required: &["blocking_agent", "concentration", "duration_min"],
        optional: &["temperature", "buffer", "additives"],
        description: "Blocking non-specific binding sites",
    },
    RequirementSpec {
        action: "stain",
        required: &["reagent_name", "concentration_or_dilution", "duration_min", "temperature"],
        optional: &[
            "reagent_catalog_number",
            "reagent_vendor",
            "buffer",
            "wash_after",
            "light_protection",
        ],
        description: "Immunostaining or dye labeling",
    },
    RequirementSpec {
        action: "wash",
        required: &["wash_buffer", "number_of_washes", "duration_per_wash_min"],
        optional: &["volume_per_wash", "agitation", "temperature"],
        description: "Washing steps to remove excess reagents",
    },
    RequirementSpec {
        action: "mount",
        required: &["mounting_medium"],
        optional: &["coverslip_thickness", "coverslip_size", "sealing_method", "curing_time"],
        description: "Mounting samples for microscopy",
    },
    // Imaging
    RequirementSpec {
        action: "image",
        required: &["microscope_type", "objective_magnification", "objective_na", "channels"],
        optional: &[
            "exposure_ms",
            "laser_power_percent",
            "detector_gain",
            "pixel_size_um",
            "z_step_um",
            "z_range_um",
            "time_interval",
            "frame_averaging",
            "pinhole_size",
            "immersion_medium",
            "binning",
        ],
        description: "Microscopy imaging parameters",
    },
    RequirementSpec {
        action: "calibrate",
        required: &["calibration_type", "calibration_standard"],
        optional: &["calibration_date", "frequency"],
        description: "Instrument calibration",
    },
    // Incubation and culture
    RequirementSpec {
        action: "incubate",
        required: &["duration_min", "temperature"],
        optional: &["humidity", "co2_percent", "agitation", "light_conditions"],
        description: "General incubation step",
    },
    RequirementSpec {
        action: "culturing",
        required: &["medium", "duration_days"],
        optional: &["temperature", "co2_percentage", "humidity", "feeding_schedule"],
        description: "Cell or tissue culture maintenance",
    },
    RequirementSpec {
        action: "formation",
        required: &["structure"],
        optional: &["conditions", "duration_days", "growth_factors"],
        description: "Formation of biological structures",
    },
    RequirementSpec {
        action: "morphogenesis",
        required: &["developmental_stage"],
        optional: &["growth_factors", "duration_days", "monitoring_method"],
        description: "Morphological development process",
    },
    // Treatments
    RequirementSpec {
        action: "treatment",
        required: &["reagent", "concentration", "duration_min"],
        optional: &["temperature", "volume", "solvent", "application_method"],
        description: "General treatment or drug application",
    },
    RequirementSpec {
        action: "inhibition",
        required: &["inhibitor", "concentration"],
        optional: &["duration_min", "target_pathway", "vehicle"],
        description: "Inhibition of biological processes",
    },
    RequirementSpec {
        action: "signaling",
        required: &["pathway"],
        optional: &["ligand", "concentration", "duration_min"],
        description: "Cell signaling pathway analysis",
    },
    // Generic steps
    RequirementSpec {
        action: "process",
        required: &["method"],
        optional: &["duration_min", "temperature", "equipment"],
        description: "General processing step",
    },
    RequirementSpec {
        action: "analyze",
        required: &["software", "analysis_method"],
        optional: &["software_version", "parameters", "thresholds"],
        description: "Image or data analysis",
    },
    RequirementSpec {
        action: "classification",
        required: &["criteria"],
        optional: &["method", "software", "validation"],
        description: "Classification or categorization step",
    },
    RequirementSpec {
        action: "cost_analysis",
        required: &["method"],
        optional: &["software", "parameters", "comparison_groups"],
        description: "Cost-effectiveness analysis",
    },
    RequirementSpec {
        action: "explanation",
        required: &["topic"],
        optional: &["method", "references", "context"],
        description: "Explanatory or descriptive step",
    },
];
