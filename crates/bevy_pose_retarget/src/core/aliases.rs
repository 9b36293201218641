/// Alternate spellings of canonical joint names, as used by other authoring tools and engines.
///
/// Order matters twice: entries are scanned top to bottom, and within an entry the first alias
/// that exists on the skeleton wins.
pub const JOINT_ALIASES: &[(&str, &[&str])] = &[
    ("Hips", &["Pelvis", "Root", "Bip01_Pelvis", "Hip", "J_Bip_C_Hips"]),
    ("Spine", &["Spine1", "Bip01_Spine", "Torso", "Spine_01", "J_Bip_C_Spine"]),
    (
        "Spine1",
        &["Spine2", "Bip01_Spine1", "Chest", "Spine_02", "UpperChest", "J_Bip_C_Chest"],
    ),
    (
        "Spine2",
        &["Spine3", "Bip01_Spine2", "UpperChest", "Chest", "Spine_03", "J_Bip_C_UpperChest"],
    ),
    ("Neck", &["Neck1", "Bip01_Neck", "Neck_01", "J_Bip_C_Neck"]),
    ("Head", &["Head1", "Bip01_Head", "Head_01", "J_Bip_C_Head"]),
    // Left arm
    (
        "LeftShoulder",
        &["L_Clavicle", "Clavicle_L", "Bip01_L_Clavicle", "LeftCollar", "Shoulder_L", "J_Bip_L_Shoulder"],
    ),
    (
        "LeftArm",
        &["L_UpperArm", "UpperArm_L", "Bip01_L_UpperArm", "LeftUpArm", "Arm_L", "LeftUpperArm", "J_Bip_L_UpperArm"],
    ),
    (
        "LeftForeArm",
        &["L_Forearm", "LowerArm_L", "Bip01_L_Forearm", "ForeArm_L", "LeftLowerArm", "J_Bip_L_LowerArm"],
    ),
    ("LeftHand", &["L_Hand", "Hand_L", "Bip01_L_Hand", "J_Bip_L_Hand"]),
    // Right arm
    (
        "RightShoulder",
        &["R_Clavicle", "Clavicle_R", "Bip01_R_Clavicle", "RightCollar", "Shoulder_R", "J_Bip_R_Shoulder"],
    ),
    (
        "RightArm",
        &["R_UpperArm", "UpperArm_R", "Bip01_R_UpperArm", "RightUpArm", "Arm_R", "RightUpperArm", "J_Bip_R_UpperArm"],
    ),
    (
        "RightForeArm",
        &["R_Forearm", "LowerArm_R", "Bip01_R_Forearm", "ForeArm_R", "RightLowerArm", "J_Bip_R_LowerArm"],
    ),
    ("RightHand", &["R_Hand", "Hand_R", "Bip01_R_Hand", "J_Bip_R_Hand"]),
    // Left leg
    (
        "LeftUpLeg",
        &["L_Thigh", "Thigh_L", "Bip01_L_Thigh", "LeftLeg", "UpLeg_L", "LeftUpperLeg", "J_Bip_L_UpperLeg"],
    ),
    (
        "LeftLeg",
        &["L_Calf", "Calf_L", "Bip01_L_Calf", "LeftLowLeg", "Leg_L", "Shin_L", "LeftLowerLeg", "J_Bip_L_LowerLeg"],
    ),
    ("LeftFoot", &["L_Foot", "Foot_L", "Bip01_L_Foot", "J_Bip_L_Foot"]),
    ("LeftToeBase", &["L_Toe0", "Toe_L", "Bip01_L_Toe0", "LeftToe", "LeftToes", "J_Bip_L_ToeBase"]),
    // Right leg
    (
        "RightUpLeg",
        &["R_Thigh", "Thigh_R", "Bip01_R_Thigh", "RightLeg", "UpLeg_R", "RightUpperLeg", "J_Bip_R_UpperLeg"],
    ),
    (
        "RightLeg",
        &["R_Calf", "Calf_R", "Bip01_R_Calf", "RightLowLeg", "Leg_R", "Shin_R", "RightLowerLeg", "J_Bip_R_LowerLeg"],
    ),
    ("RightFoot", &["R_Foot", "Foot_R", "Bip01_R_Foot", "J_Bip_R_Foot"]),
    ("RightToeBase", &["R_Toe0", "Toe_R", "Bip01_R_Toe0", "RightToe", "RightToes", "J_Bip_R_ToeBase"]),
    // Fingers
    ("LeftHandThumb1", &["L_Thumb1", "Thumb_01_L", "Bip01_L_Finger0", "LeftThumbProximal"]),
    ("LeftHandIndex1", &["L_Index1", "Index_01_L", "Bip01_L_Finger1", "LeftIndexProximal"]),
    ("LeftHandMiddle1", &["L_Middle1", "Middle_01_L", "Bip01_L_Finger2", "LeftMiddleProximal"]),
    ("LeftHandRing1", &["L_Ring1", "Ring_01_L", "Bip01_L_Finger3", "LeftRingProximal"]),
    ("LeftHandPinky1", &["L_Pinky1", "Pinky_01_L", "Bip01_L_Finger4", "LeftLittleProximal"]),
    ("RightHandThumb1", &["R_Thumb1", "Thumb_01_R", "Bip01_R_Finger0", "RightThumbProximal"]),
    ("RightHandIndex1", &["R_Index1", "Index_01_R", "Bip01_R_Finger1", "RightIndexProximal"]),
    ("RightHandMiddle1", &["R_Middle1", "Middle_01_R", "Bip01_R_Finger2", "RightMiddleProximal"]),
    ("RightHandRing1", &["R_Ring1", "Ring_01_R", "Bip01_R_Finger3", "RightRingProximal"]),
    ("RightHandPinky1", &["R_Pinky1", "Pinky_01_R", "Bip01_R_Finger4", "RightLittleProximal"]),
];
