use clap::Args;
use riskwise::assessment::{
    BodyMeasurements, ChestPain, DiabetesScreening, Ethnicity, FamilyHistory, HeartClinical,
    HeartQuestionnaire, Level, RestingEcg, RiskAssessmentService, RiskDomain, Sex, StSlope,
    Thalassemia, ThyroidQuestionnaire,
};
use riskwise::error::AppError;

use crate::render;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the lifestyle what-if portion of the heart questionnaire demo.
    #[arg(long)]
    pub(crate) skip_what_if: bool,
}

pub(crate) fn run_demo(service: &RiskAssessmentService, args: DemoArgs) -> Result<(), AppError> {
    render::header("Riskwise screening demo");

    for domain in RiskDomain::ordered() {
        if service.registry().adapter(domain).is_none() {
            println!("\n{}: model not loaded, skipping", domain.label());
            continue;
        }

        match domain {
            RiskDomain::HeartQuestionnaire => {
                let answers = demo_heart_questionnaire().answers();
                let assessment = service.assess_heart_questionnaire(&answers)?;
                render::heart_questionnaire(&assessment);

                if !args.skip_what_if {
                    let outcome = service.what_if(&answers, &assessment.available_changes)?;
                    render::what_if(outcome.as_ref());
                }
            }
            RiskDomain::HeartClinical => {
                let prediction = service.assess_heart_clinical(&demo_heart_clinical().answers())?;
                render::prediction(domain, &prediction);
            }
            RiskDomain::Diabetes => {
                let assessment = service.assess_diabetes(&demo_diabetes().answers())?;
                render::diabetes(&assessment);
            }
            RiskDomain::Thyroid => {
                let assessment = service.assess_thyroid(&demo_thyroid().answers())?;
                render::thyroid(&assessment);
            }
        }
    }

    Ok(())
}

fn demo_heart_questionnaire() -> HeartQuestionnaire {
    HeartQuestionnaire {
        age: 52,
        gender: Sex::Male,
        blood_pressure: 142.0,
        bmi: 28.3,
        smoking: true,
        exercise: Level::Low,
        sleep_hours: 5.0,
        stress: Level::High,
        sugar: Level::Medium,
        diabetes: false,
        family_heart_disease: true,
        high_blood_pressure: true,
    }
}

fn demo_heart_clinical() -> HeartClinical {
    HeartClinical {
        age: 58,
        sex: Sex::Female,
        chest_pain: ChestPain::NonAnginalPain,
        resting_bp: 132.0,
        cholesterol: 236.0,
        high_fasting_sugar: false,
        resting_ecg: RestingEcg::StTAbnormality,
        max_heart_rate: 148.0,
        exercise_angina: false,
        oldpeak: 1.1,
        st_slope: StSlope::Flat,
        major_vessels: 1,
        thalassemia: Thalassemia::Normal,
    }
}

fn demo_diabetes() -> DiabetesScreening {
    DiabetesScreening {
        sex: Sex::Female,
        pregnancies: 2,
        glucose: 138.0,
        blood_pressure: 76.0,
        skin_thickness: 28.0,
        insulin: 110.0,
        age: 46,
        body: BodyMeasurements {
            height_feet: 5.0,
            height_inches: 5.0,
            weight_kg: 78.0,
        },
        family: FamilyHistory {
            parent: true,
            sibling: false,
            grandparent: false,
            early_onset: true,
        },
    }
}

fn demo_thyroid() -> ThyroidQuestionnaire {
    ThyroidQuestionnaire {
        age: 41,
        gender: Sex::Female,
        ethnicity: Ethnicity::Asian,
        family_history: true,
        radiation_exposure: false,
        iodine_deficiency: true,
        smoking: false,
        diabetes: false,
        nodule_size: 1.8,
        body: BodyMeasurements {
            height_feet: 5.0,
            height_inches: 3.0,
            weight_kg: 61.0,
        },
    }
}
