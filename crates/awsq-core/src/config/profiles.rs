//! Built-in service profiles: default endpoint and API version per service.

/// Default endpoint and API version for one Query-protocol service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceProfile {
    pub name: &'static str,
    pub service_url: &'static str,
    pub service_version: &'static str,
}

pub const PROFILES: &[ServiceProfile] = &[
    ServiceProfile {
        name: "ec2",
        service_url: "https://ec2.amazonaws.com/",
        service_version: "2010-08-31",
    },
    ServiceProfile {
        name: "sdb",
        service_url: "https://sdb.amazonaws.com/",
        service_version: "2009-04-15",
    },
    ServiceProfile {
        name: "sqs",
        service_url: "https://queue.amazonaws.com/",
        service_version: "2009-02-01",
    },
    ServiceProfile {
        name: "iam",
        service_url: "https://iam.amazonaws.com/",
        service_version: "2010-05-08",
    },
    ServiceProfile {
        name: "autoscaling",
        service_url: "https://autoscaling.amazonaws.com/",
        service_version: "2010-08-01",
    },
    ServiceProfile {
        name: "cloudformation",
        service_url: "https://cloudformation.us-east-1.amazonaws.com/",
        service_version: "2010-05-15",
    },
    ServiceProfile {
        name: "elasticbeanstalk",
        service_url: "https://elasticbeanstalk.us-east-1.amazonaws.com/",
        service_version: "2010-12-01",
    },
    ServiceProfile {
        name: "elasticloadbalancing",
        service_url: "https://elasticloadbalancing.amazonaws.com/",
        service_version: "2010-07-01",
    },
    ServiceProfile {
        name: "rds",
        service_url: "https://rds.amazonaws.com/",
        service_version: "2010-07-28",
    },
    ServiceProfile {
        name: "elasticmapreduce",
        service_url: "https://elasticmapreduce.amazonaws.com/",
        service_version: "2009-03-31",
    },
    ServiceProfile {
        name: "monitoring",
        service_url: "https://monitoring.amazonaws.com/",
        service_version: "2010-08-01",
    },
];

/// Look up a built-in profile by service name (case-insensitive).
pub fn profile(name: &str) -> Option<&'static ServiceProfile> {
    PROFILES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
