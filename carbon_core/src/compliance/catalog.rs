//! Built-in rating standards.
//!
//! Category trees and weights follow the published credit structures in
//! simplified form; thresholds are on the 0-100 weighted score scale.

use super::CalculationType::{Absolute, Percentage, Ratio};
use super::{Category, ComplianceStandard};

/// Every standard registered by
/// [`super::ComplianceStandardsEngine::with_default_catalog`].
pub fn default_standards() -> Vec<ComplianceStandard> {
    vec![
        leed(),
        breeam(),
        casbee(),
        green_star(),
        nabers(),
        ghg_scope_1(),
        ghg_scope_2(),
        ghg_scope_3(),
    ]
}

/// LEED v4.1 BD+C, 110 points, categories weighted equally per point.
pub fn leed() -> ComplianceStandard {
    ComplianceStandard::new("LEED", "LEED", "v4.1 BD+C")
        .category(
            Category::new("integrative_process", "Integrative Process", 1.0)
                .sub("integrative_design", "Integrative Design", 1.0, Absolute),
        )
        .category(
            Category::new("location_transportation", "Location and Transportation", 1.0)
                .sub("sensitive_land", "Sensitive Land Protection", 1.0, Absolute)
                .sub("high_priority_site", "High Priority Site", 2.0, Absolute)
                .sub("surrounding_density", "Surrounding Density and Diverse Uses", 5.0, Percentage)
                .sub("access_quality_transit", "Access to Quality Transit", 5.0, Percentage)
                .sub("bicycle_facilities", "Bicycle Facilities", 1.0, Absolute)
                .sub("reduced_parking", "Reduced Parking Footprint", 1.0, Absolute)
                .sub("green_vehicles", "Electric Vehicles", 1.0, Absolute),
        )
        .category(
            Category::new("sustainable_sites", "Sustainable Sites", 1.0)
                .sub("site_assessment", "Site Assessment", 1.0, Absolute)
                .sub("protect_habitat", "Protect or Restore Habitat", 2.0, Absolute)
                .sub("open_space", "Open Space", 1.0, Absolute)
                .sub("rainwater_management", "Rainwater Management", 3.0, Percentage)
                .sub("heat_island", "Heat Island Reduction", 2.0, Percentage)
                .sub("light_pollution", "Light Pollution Reduction", 1.0, Absolute)
                .requirement("Construction Activity Pollution Prevention"),
        )
        .category(
            Category::new("water_efficiency", "Water Efficiency", 1.0)
                .sub("outdoor_water", "Outdoor Water Use Reduction", 2.0, Percentage)
                .sub("indoor_water", "Indoor Water Use Reduction", 6.0, Percentage)
                .sub("cooling_tower", "Optimize Process Water Use", 2.0, Ratio)
                .sub("water_metering", "Water Metering", 1.0, Absolute)
                .requirement("Building-Level Water Metering"),
        )
        .category(
            Category::new("energy_atmosphere", "Energy and Atmosphere", 1.0)
                .sub("enhanced_commissioning", "Enhanced Commissioning", 6.0, Absolute)
                .sub("optimize_energy", "Optimize Energy Performance", 18.0, Percentage)
                .sub("advanced_metering", "Advanced Energy Metering", 1.0, Absolute)
                .sub("demand_response", "Grid Harmonization", 2.0, Absolute)
                .sub("renewable_energy", "Renewable Energy", 5.0, Ratio)
                .sub("refrigerant_management", "Enhanced Refrigerant Management", 1.0, Absolute)
                .requirement("Fundamental Commissioning and Verification")
                .requirement("Minimum Energy Performance")
                .requirement("Fundamental Refrigerant Management"),
        )
        .category(
            Category::new("materials_resources", "Materials and Resources", 1.0)
                .sub("building_life_cycle", "Building Life-Cycle Impact Reduction", 5.0, Percentage)
                .sub("epd_disclosure", "Environmental Product Declarations", 2.0, Ratio)
                .sub("sourcing_raw_materials", "Sourcing of Raw Materials", 2.0, Ratio)
                .sub("material_ingredients", "Material Ingredients", 2.0, Ratio)
                .sub("construction_waste", "Construction and Demolition Waste Management", 2.0, Percentage)
                .requirement("Storage and Collection of Recyclables"),
        )
        .category(
            Category::new("indoor_environmental_quality", "Indoor Environmental Quality", 1.0)
                .sub("enhanced_iaq", "Enhanced Indoor Air Quality Strategies", 2.0, Absolute)
                .sub("low_emitting", "Low-Emitting Materials", 3.0, Ratio)
                .sub("construction_iaq", "Construction Indoor Air Quality Management", 1.0, Absolute)
                .sub("iaq_assessment", "Indoor Air Quality Assessment", 2.0, Absolute)
                .sub("thermal_comfort", "Thermal Comfort", 1.0, Absolute)
                .sub("interior_lighting", "Interior Lighting", 2.0, Absolute)
                .sub("daylight", "Daylight", 3.0, Percentage)
                .sub("quality_views", "Quality Views", 1.0, Absolute)
                .sub("acoustic", "Acoustic Performance", 1.0, Absolute)
                .requirement("Minimum Indoor Air Quality Performance"),
        )
        .category(
            Category::new("innovation", "Innovation", 1.0)
                .sub("innovation", "Innovation", 5.0, Absolute)
                .sub("accredited_professional", "LEED Accredited Professional", 1.0, Absolute),
        )
        .category(
            Category::new("regional_priority", "Regional Priority", 1.0)
                .sub("regional_priority", "Regional Priority Credits", 4.0, Ratio),
        )
        .threshold("Platinum", 80.0)
        .threshold("Gold", 60.0)
        .threshold("Silver", 50.0)
        .threshold("Certified", 40.0)
}

/// BREEAM New Construction 2018, environmental section weightings.
pub fn breeam() -> ComplianceStandard {
    ComplianceStandard::new("BREEAM", "BREEAM", "New Construction 2018")
        .category(
            Category::new("management", "Management", 0.11)
                .sub("man01_project_brief", "Project Brief and Design", 4.0, Absolute)
                .sub("man02_life_cycle_cost", "Life Cycle Cost and Service Life Planning", 4.0, Percentage)
                .sub("man03_responsible_construction", "Responsible Construction Practices", 6.0, Absolute)
                .sub("man04_commissioning", "Commissioning and Handover", 4.0, Absolute),
        )
        .category(
            Category::new("health_wellbeing", "Health and Wellbeing", 0.14)
                .sub("hea01_visual_comfort", "Visual Comfort", 6.0, Percentage)
                .sub("hea02_indoor_air_quality", "Indoor Air Quality", 5.0, Absolute)
                .sub("hea04_thermal_comfort", "Thermal Comfort", 3.0, Absolute)
                .sub("hea05_acoustic", "Acoustic Performance", 4.0, Absolute)
                .sub("hea06_safety", "Security", 2.0, Absolute),
        )
        .category(
            Category::new("energy", "Energy", 0.16)
                .sub("ene01_reduction", "Reduction of Energy Use and Carbon Emissions", 13.0, Percentage)
                .sub("ene02_metering", "Energy Monitoring", 2.0, Absolute)
                .sub("ene04_low_carbon_design", "Low Carbon Design", 3.0, Ratio)
                .sub("ene06_transport_systems", "Energy Efficient Transport Systems", 3.0, Absolute),
        )
        .category(
            Category::new("transport", "Transport", 0.10)
                .sub("tra01_transport_assessment", "Transport Assessment and Travel Plan", 2.0, Absolute)
                .sub("tra02_sustainable_transport", "Sustainable Transport Measures", 10.0, Percentage),
        )
        .category(
            Category::new("water", "Water", 0.07)
                .sub("wat01_consumption", "Water Consumption", 5.0, Percentage)
                .sub("wat02_monitoring", "Water Monitoring", 1.0, Absolute)
                .sub("wat03_leak_detection", "Water Leak Detection", 2.0, Absolute)
                .sub("wat04_efficient_equipment", "Water Efficient Equipment", 1.0, Absolute),
        )
        .category(
            Category::new("materials", "Materials", 0.15)
                .sub("mat01_life_cycle_impacts", "Environmental Impacts from Construction Products", 7.0, Percentage)
                .sub("mat03_responsible_sourcing", "Responsible Sourcing of Construction Products", 4.0, Ratio)
                .sub("mat05_durability", "Designing for Durability and Resilience", 1.0, Absolute)
                .sub("mat06_material_efficiency", "Material Efficiency", 1.0, Absolute),
        )
        .category(
            Category::new("waste", "Waste", 0.06)
                .sub("wst01_construction_waste", "Construction Waste Management", 5.0, Percentage)
                .sub("wst02_recycled_aggregates", "Use of Recycled and Sustainable Aggregates", 1.0, Ratio)
                .sub("wst03_operational_waste", "Operational Waste", 1.0, Absolute)
                .sub("wst05_adaptation", "Adaptation to Climate Change", 1.0, Absolute),
        )
        .category(
            Category::new("land_use_ecology", "Land Use and Ecology", 0.13)
                .sub("le01_site_selection", "Site Selection", 2.0, Absolute)
                .sub("le02_ecological_risk", "Ecological Risks and Opportunities", 2.0, Absolute)
                .sub("le04_enhancement", "Change and Enhancement of Ecological Value", 3.0, Percentage)
                .sub("le05_long_term_management", "Long Term Ecology Management", 3.0, Absolute),
        )
        .category(
            Category::new("pollution", "Pollution", 0.08)
                .sub("pol01_refrigerants", "Impact of Refrigerants", 4.0, Absolute)
                .sub("pol02_nox", "Local Air Quality", 2.0, Percentage)
                .sub("pol03_flood_risk", "Flood and Surface Water Management", 5.0, Absolute)
                .sub("pol04_light", "Reduction of Night Time Light Pollution", 1.0, Absolute)
                .sub("pol05_noise", "Reduction of Noise Pollution", 1.0, Absolute),
        )
        .threshold("Outstanding", 85.0)
        .threshold("Excellent", 70.0)
        .threshold("Very Good", 55.0)
        .threshold("Good", 45.0)
        .threshold("Pass", 30.0)
}

/// CASBEE for New Construction; Q (quality) and LR (load reduction) halves
/// weighted equally. Each item is scored on a five-level scale.
pub fn casbee() -> ComplianceStandard {
    ComplianceStandard::new("CASBEE", "CASBEE", "New Construction 2014")
        .category(
            Category::new("q1_indoor_environment", "Q1 Indoor Environment", 0.20)
                .sub("q1_sound", "Noise and Acoustics", 5.0, Absolute)
                .sub("q1_thermal", "Thermal Comfort", 5.0, Percentage)
                .sub("q1_lighting", "Lighting and Illumination", 5.0, Percentage)
                .sub("q1_air_quality", "Air Quality", 5.0, Absolute),
        )
        .category(
            Category::new("q2_quality_of_service", "Q2 Quality of Service", 0.15)
                .sub("q2_functionality", "Service Ability", 5.0, Absolute)
                .sub("q2_durability", "Durability and Reliability", 5.0, Ratio)
                .sub("q2_flexibility", "Flexibility and Adaptability", 5.0, Absolute),
        )
        .category(
            Category::new("q3_outdoor_environment", "Q3 Outdoor Environment on Site", 0.15)
                .sub("q3_ecosystem", "Preservation and Creation of Biotope", 5.0, Percentage)
                .sub("q3_townscape", "Townscape and Landscape", 5.0, Absolute),
        )
        .category(
            Category::new("lr1_energy", "LR1 Energy", 0.20)
                .sub("lr1_thermal_load", "Building Thermal Load", 5.0, Percentage)
                .sub("lr1_natural_energy", "Natural Energy Utilization", 5.0, Ratio)
                .sub("lr1_systems", "Efficiency in Building Service Systems", 5.0, Percentage)
                .sub("lr1_operation", "Efficient Operation", 5.0, Absolute),
        )
        .category(
            Category::new("lr2_resources_materials", "LR2 Resources and Materials", 0.15)
                .sub("lr2_water", "Water Resources", 5.0, Percentage)
                .sub("lr2_material_reduction", "Reducing Usage of Non-renewable Materials", 5.0, Ratio)
                .sub("lr2_pollutants", "Avoiding Materials with Pollutant Content", 5.0, Absolute),
        )
        .category(
            Category::new("lr3_off_site_environment", "LR3 Off-site Environment", 0.15)
                .sub("lr3_global_warming", "Consideration of Global Warming", 5.0, Percentage)
                .sub("lr3_local_environment", "Consideration of Local Environment", 5.0, Absolute)
                .sub("lr3_surroundings", "Consideration of Surrounding Environment", 5.0, Absolute),
        )
        .threshold("S", 80.0)
        .threshold("A", 65.0)
        .threshold("B+", 50.0)
        .threshold("B-", 35.0)
}

/// Green Star Design & As Built.
pub fn green_star() -> ComplianceStandard {
    ComplianceStandard::new("GREEN_STAR", "Green Star", "Design & As Built v1.3")
        .category(
            Category::new("management", "Management", 0.14)
                .sub("commissioning", "Commissioning and Tuning", 4.0, Absolute)
                .sub("metering", "Metering and Monitoring", 2.0, Absolute)
                .sub("environmental_management", "Construction Environmental Management", 2.0, Absolute),
        )
        .category(
            Category::new("indoor_environment_quality", "Indoor Environment Quality", 0.17)
                .sub("indoor_air", "Indoor Air Quality", 4.0, Absolute)
                .sub("lighting_comfort", "Lighting Comfort", 3.0, Percentage)
                .sub("thermal_comfort", "Thermal Comfort", 2.0, Percentage),
        )
        .category(
            Category::new("energy", "Energy", 0.22)
                .sub("greenhouse_gas_emissions", "Greenhouse Gas Emissions", 20.0, Percentage)
                .sub("peak_electricity_demand", "Peak Electricity Demand Reduction", 2.0, Ratio),
        )
        .category(
            Category::new("transport", "Transport", 0.10)
                .sub("sustainable_transport", "Sustainable Transport", 10.0, Percentage),
        )
        .category(
            Category::new("water", "Water", 0.12)
                .sub("potable_water", "Potable Water", 12.0, Percentage),
        )
        .category(
            Category::new("materials", "Materials", 0.14)
                .sub("life_cycle_impacts", "Life Cycle Impacts", 7.0, Percentage)
                .sub("responsible_products", "Responsible Building Materials", 3.0, Ratio)
                .sub("construction_waste", "Construction and Demolition Waste", 1.0, Ratio),
        )
        .category(
            Category::new("land_use_ecology", "Land Use and Ecology", 0.06)
                .sub("ecological_value", "Ecological Value", 3.0, Ratio)
                .sub("sustainable_sites", "Sustainable Sites", 2.0, Absolute),
        )
        .category(
            Category::new("emissions", "Emissions", 0.05)
                .sub("stormwater", "Stormwater", 2.0, Absolute)
                .sub("light_pollution", "Light Pollution", 1.0, Absolute)
                .sub("refrigerant_impacts", "Refrigerant Impacts", 1.0, Ratio),
        )
        .threshold("6 Star", 75.0)
        .threshold("5 Star", 60.0)
        .threshold("4 Star", 45.0)
        .threshold("3 Star", 30.0)
        .threshold("2 Star", 15.0)
        .threshold("1 Star", 10.0)
}

/// NABERS operational performance (energy, water, waste, indoor environment).
pub fn nabers() -> ComplianceStandard {
    ComplianceStandard::new("NABERS", "NABERS", "Office 2023")
        .category(
            Category::new("energy", "Energy", 0.50)
                .sub("energy_intensity", "Greenhouse Gas Intensity", 10.0, Ratio)
                .sub("renewable_supply", "Renewable Electricity Supply", 5.0, Percentage),
        )
        .category(
            Category::new("water", "Water", 0.20)
                .sub("water_intensity", "Water Use Intensity", 10.0, Ratio),
        )
        .category(
            Category::new("waste", "Waste", 0.15)
                .sub("waste_diversion", "Waste Diversion from Landfill", 10.0, Percentage),
        )
        .category(
            Category::new("indoor_environment", "Indoor Environment", 0.15)
                .sub("ventilation", "Ventilation Effectiveness", 5.0, Absolute)
                .sub("occupant_satisfaction", "Occupant Satisfaction", 5.0, Percentage),
        )
        .threshold("6 Star", 85.0)
        .threshold("5 Star", 70.0)
        .threshold("4 Star", 55.0)
        .threshold("3 Star", 40.0)
        .threshold("2 Star", 25.0)
        .threshold("1 Star", 10.0)
}

fn ghg_ladder(standard: ComplianceStandard) -> ComplianceStandard {
    standard
        .threshold("Leadership", 80.0)
        .threshold("Management", 60.0)
        .threshold("Awareness", 40.0)
        .threshold("Disclosure", 20.0)
}

/// GHG Protocol Scope 1: direct emissions.
pub fn ghg_scope_1() -> ComplianceStandard {
    ghg_ladder(
        ComplianceStandard::new("GHG_SCOPE_1", "GHG Protocol Scope 1", "Corporate Standard")
            .category(
                Category::new("stationary_combustion", "Stationary Combustion", 0.4)
                    .sub("fuel_reduction", "Fuel Consumption Reduction", 10.0, Ratio)
                    .sub("fuel_switching", "Low Carbon Fuel Switching", 10.0, Percentage),
            )
            .category(
                Category::new("mobile_combustion", "Mobile Combustion", 0.3)
                    .sub("fleet_efficiency", "Fleet Efficiency", 10.0, Percentage)
                    .sub("fleet_electrification", "Fleet Electrification", 10.0, Ratio),
            )
            .category(
                Category::new("fugitive_emissions", "Fugitive Emissions", 0.3)
                    .sub("refrigerant_management", "Refrigerant Management", 10.0, Absolute)
                    .sub("leak_detection", "Leak Detection and Repair", 10.0, Absolute),
            ),
    )
}

/// GHG Protocol Scope 2: purchased energy.
pub fn ghg_scope_2() -> ComplianceStandard {
    ghg_ladder(
        ComplianceStandard::new("GHG_SCOPE_2", "GHG Protocol Scope 2", "Scope 2 Guidance")
            .category(
                Category::new("purchased_electricity", "Purchased Electricity", 0.7)
                    .sub("renewable_procurement", "Renewable Electricity Procurement", 10.0, Ratio)
                    .sub("electricity_efficiency", "Electricity Efficiency", 10.0, Percentage),
            )
            .category(
                Category::new("purchased_heat_steam", "Purchased Heat and Steam", 0.3)
                    .sub("heat_efficiency", "Heat Demand Reduction", 10.0, Percentage)
                    .sub("low_carbon_district", "Low Carbon District Energy", 10.0, Absolute),
            ),
    )
}

/// GHG Protocol Scope 3: value-chain emissions.
pub fn ghg_scope_3() -> ComplianceStandard {
    ghg_ladder(
        ComplianceStandard::new("GHG_SCOPE_3", "GHG Protocol Scope 3", "Corporate Value Chain Standard")
            .category(
                Category::new("purchased_materials", "Purchased Goods and Materials", 0.4)
                    .sub("supplier_engagement", "Supplier Engagement", 10.0, Absolute)
                    .sub("embodied_carbon", "Embodied Carbon Reduction", 10.0, Ratio),
            )
            .category(
                Category::new("business_travel", "Business Travel", 0.2)
                    .sub("travel_reduction", "Travel Reduction", 10.0, Percentage),
            )
            .category(
                Category::new("employee_commuting", "Employee Commuting", 0.2)
                    .sub("commuting_programs", "Commuting Programs", 10.0, Absolute)
                    .sub("commuting_reduction", "Commuting Emissions Reduction", 10.0, Percentage),
            )
            .category(
                Category::new("waste", "Waste Generated in Operations", 0.2)
                    .sub("waste_diversion", "Waste Diversion", 10.0, Ratio),
            ),
    )
}
