pub mod configuration;

pub mod instrument {
    pub mod interestrate {
        pub mod interestrateswap;
    }
}

pub mod interestrate {
    pub mod compounding;
}

pub mod market {
    pub mod curvestore;
    pub mod fixingstore;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod piecewiselinear;
        }
    }
}

pub mod model {
    pub mod interestrate {
        pub mod ratecalculator;
    }
}

pub mod pricingcondition;

pub mod risk {
    pub mod riskladder;
    pub mod riskreport;
    pub mod riskengine;
}

pub mod time {
    pub mod period;
    pub mod daycounter;

    pub mod schedule {
        pub mod scheduleperiod;
        pub mod schedule;
    }
}

pub mod valuationerror;

pub mod value {
    pub mod legvaluer;
}
